// src/app/vue.rs
//
// Vue (UI egui) - natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Opérateurs bit à bit visibles en mode Nombres seulement
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;
use tracing::{debug, warn};

use calculatrice_exacte::noyau::exact::PRECISION_MAX;
use calculatrice_exacte::noyau::{eval_expression, Mode, Op};

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice exacte");
                ui.add_space(6.0);

                self.ui_mode(ui);
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Mode :");
            for mode in Mode::TOUS {
                if ui.radio(self.mode == mode, mode.to_string()).clicked() {
                    self.set_mode(mode);
                    self.focus_entree = true;
                }
            }
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let indice = match self.mode {
            Mode::Nombres => "Ex: 1 << 4 | 3, 7 / 2, 2 ** 10",
            _ => "Ex: 1/3 + 1/3 + 1/3, (2+3)*4, 2 ** -2",
        };

        // id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text(indice)
                .id_source("entree_edit")
                .code_editor(),
        );

        // Après un clic sur un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue seulement si le champ est focus
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultats + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.add_enabled_ui(self.mode == Mode::Exact, |ui| {
                ui.label("Précision :");
                let mut p = self.precision;
                let resp = ui.add(
                    egui::DragValue::new(&mut p)
                        .speed(1)
                        .range(0..=PRECISION_MAX)
                        .suffix(" décimales"),
                );
                if resp.changed() {
                    self.set_precision(p);
                }
            });
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", InsertKind::CloseParen);

            for op in Op::TOUS.into_iter().filter(|op| !op.est_bit_a_bit()) {
                self.bouton_insert(ui, op.symbole(), InsertKind::Op);
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        if self.mode == Mode::Nombres {
            ui.horizontal_wrapped(|ui| {
                for op in Op::TOUS.into_iter().filter(|op| op.est_bit_a_bit()) {
                    self.bouton_insert(ui, op.symbole(), InsertKind::Op);
                }
            });
        }

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for chiffre in ligne {
                        self.bouton_insert(ui, chiffre, InsertKind::Digit);
                    }
                    match ligne[0] {
                        "7" => self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace),
                        "4" => self.bouton_insert(ui, "-", InsertKind::Sign),
                        _ => self.bouton_insert(ui, ".", InsertKind::Digit),
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup un opérateur entier ("**", ">>>", …).
    fn backspace_entree(&mut self) {
        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
        if self.entree.is_empty() {
            return;
        }

        let symbole = Op::TOUS
            .iter()
            .map(|op| op.symbole())
            .filter(|s| self.entree.ends_with(s))
            .max_by_key(|s| s.len());

        match symbole {
            Some(s) => {
                let n = self.entree.len() - s.len();
                self.entree.truncate(n);
            }
            None => {
                self.entree.pop();
            }
        }

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        if let Some(f) = &self.fraction {
            ui.add_space(6.0);
            ui.label("Fraction :");
            Self::champ_monospace(ui, "fraction_out", f, 1);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Postfixe", "demarche_postfixe", &self.demarche.postfixe);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // lecture seule, cadre via Frame + Label monospace
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, texte: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(texte));
        if resp.clicked() {
            inserer(&mut self.entree, texte, kind);
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat et démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        match eval_expression(&self.entree, self.mode, self.precision, &self.table) {
            Ok(evaluation) => {
                debug!(resultat = %evaluation.resultat, "résultat affiché");
                self.set_resultats(evaluation);
            }
            Err(e) => {
                warn!(entree = %self.entree, "évaluation refusée: {e}");
                self.set_erreur(e.to_string());
            }
        }
        self.focus_entree = true;
    }
}

/// Insertion avec espacement automatique autour des opérateurs.
fn inserer(entree: &mut String, texte: &str, kind: InsertKind) {
    match kind {
        InsertKind::CloseParen => {
            let fin = entree.trim_end().len();
            entree.truncate(fin);
            entree.push_str(texte);
        }
        InsertKind::OpenParen => {
            // "2 (" serait refusé : pas de multiplication implicite, on laisse l’erreur parler
            if entree.ends_with(|c: char| c.is_ascii_digit() || c == ')') {
                entree.push(' ');
            }
            entree.push_str(texte);
        }
        InsertKind::Op => {
            let fin = entree.trim_end().len();
            entree.truncate(fin);
            if !entree.is_empty() {
                entree.push(' ');
            }
            entree.push_str(texte);
            entree.push(' ');
        }
        // signe collé à l’opérande qui suit
        InsertKind::Sign | InsertKind::Digit => entree.push_str(texte),
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Sign,
    Op,
    OpenParen,
    CloseParen,
}
