//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, mode, précision, résultats,
//! erreur, démarche) et offrir des opérations simples (C/CLR/AC).
//! Aucune évaluation ici : la vue appelle le noyau puis dépose le résultat.

use calculatrice_exacte::noyau::exact::{PRECISION_DEFAUT, PRECISION_MAX};
use calculatrice_exacte::noyau::{DemarcheNoyau, Evaluation, Mode, TablePriorites};
use calculatrice_exacte::reglages::Reglages;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub fraction: Option<String>, // mode exact seulement
    pub erreur: String,

    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub mode: Mode,
    pub precision: usize,
    /// Table des modes nombres / flottant (réglages).
    pub table: TablePriorites,

    // valeurs de réglage, rétablies par AC
    precision_initiale: usize,
    mode_initial: Mode,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            fraction: None,
            erreur: String::new(),
            demarche: DemarcheNoyau::default(),
            mode: Mode::Exact,
            precision: PRECISION_DEFAUT,
            table: TablePriorites::complete().clone(),
            precision_initiale: PRECISION_DEFAUT,
            mode_initial: Mode::Exact,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    pub fn depuis_reglages(reglages: &Reglages) -> anyhow::Result<Self> {
        let mode = reglages.mode()?;
        let precision = reglages.precision();
        Ok(Self {
            mode,
            precision,
            table: reglages.table_priorites()?,
            precision_initiale: precision,
            mode_initial: mode,
            ..Default::default()
        })
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + mode et précision des réglages).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.precision = self.precision_initiale;
        self.mode = self.mode_initial;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.fraction = None;
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    /// On CONSERVE le dernier résultat (l’écran ne s’efface pas sur une faute),
    /// la démarche devient caduque.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    pub fn set_resultats(&mut self, evaluation: Evaluation) {
        self.erreur.clear();
        self.resultat = evaluation.resultat;
        self.fraction = evaluation.fraction;
        self.demarche = evaluation.demarche;
        self.focus_entree = true;
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.min(PRECISION_MAX);
        self.focus_entree = true;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear_resultats();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calculatrice_exacte::noyau::eval_expression;

    #[test]
    fn erreur_conserve_le_dernier_resultat() {
        let mut app = AppCalc::default();
        let ev = eval_expression("1/4", app.mode, 2, &app.table).unwrap();
        app.set_resultats(ev);
        assert_eq!(app.resultat, "0.25");
        assert_eq!(app.fraction.as_deref(), Some("1/4"));
        assert!(!app.demarche.postfixe.is_empty());

        app.set_erreur("division par zéro");
        assert_eq!(app.resultat, "0.25");
        assert!(app.demarche.postfixe.is_empty());
    }

    #[test]
    fn reset_total_revient_aux_reglages() {
        let reglages = Reglages {
            precision: Some(4),
            mode: Some("flottant".into()),
            ..Default::default()
        };
        let mut app = AppCalc::depuis_reglages(&reglages).unwrap();
        assert_eq!((app.mode, app.precision), (Mode::Flottant, 4));

        app.entree.push_str("1+1");
        app.set_precision(PRECISION_MAX + 1);
        assert_eq!(app.precision, PRECISION_MAX);
        app.set_mode(Mode::Exact);

        app.reset_total();
        assert!(app.entree.is_empty());
        assert_eq!((app.mode, app.precision), (Mode::Flottant, 4));
    }
}
