// src/noyau/jetons.rs
//
// Tokenisation : chaîne infixe -> suite de jetons (gauche à droite).
//
// Règles:
// - espaces ignorés (retirés avant lecture) ; les positions d’erreur
//   comptent dans l’expression sans espaces
// - nombres : chiffres + au plus un point décimal (12, 2.5, .5, 3.)
// - opérateurs : plus long symbole de la table active qui correspond
// - signe : en position d’opérande (début, après '(' ou un opérateur),
//   une suite de + / - se réduit à un signe (nombre impair de '-' => négatif)
//     - devant un nombre : fusionné dans le nombre ("3*-2" => 3 * -2)
//     - devant '(' : "-(" devient "(0-(" et la parenthèse est refermée
//       en même temps que celle de l’utilisateur
//   Un signe lie donc plus fort que tout opérateur binaire ("-2**2" = 4).

use std::fmt;

use super::erreur::ErreurAnalyse;
use super::operateur::Op;
use super::priorites::TablePriorites;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// Texte du nombre, signe compris ("-1", "2.5").
    Nombre(String),
    Operateur(Op),
    ParOuvrante,
    ParFermante,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreJeton {
    Operande,
    Operateur,
    ParOuvrante,
    ParFermante,
}

impl Jeton {
    pub fn genre(&self) -> GenreJeton {
        match self {
            Jeton::Nombre(_) => GenreJeton::Operande,
            Jeton::Operateur(_) => GenreJeton::Operateur,
            Jeton::ParOuvrante => GenreJeton::ParOuvrante,
            Jeton::ParFermante => GenreJeton::ParFermante,
        }
    }

    pub fn nombre(texte: impl Into<String>) -> Self {
        Jeton::Nombre(texte.into())
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(s) => f.write_str(s),
            Jeton::Operateur(op) => write!(f, "{op}"),
            Jeton::ParOuvrante => f.write_str("("),
            Jeton::ParFermante => f.write_str(")"),
        }
    }
}

/// Tokenize avec la table par défaut.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurAnalyse> {
    tokenize_avec(s, TablePriorites::defaut())
}

/// Tokenize avec une table donnée (elle fixe les opérateurs reconnus).
pub fn tokenize_avec(s: &str, table: &TablePriorites) -> Result<Vec<Jeton>, ErreurAnalyse> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Err(ErreurAnalyse::Vide);
    }

    let ops = table.operateurs();

    let mut out: Vec<Jeton> = Vec::new();
    let mut i: usize = 0;
    let mut profondeur: usize = 0;

    // profondeurs où refermer une parenthèse injectée par un signe "-("
    let mut fermetures: Vec<usize> = Vec::new();

    while i < chars.len() {
        let c = chars[i];
        let attend_operande = matches!(
            out.last(),
            None | Some(Jeton::ParOuvrante) | Some(Jeton::Operateur(_))
        );

        // Parenthèses
        if c == '(' {
            if !attend_operande {
                return Err(ErreurAnalyse::OperateurManquant { pos: i });
            }
            out.push(Jeton::ParOuvrante);
            profondeur += 1;
            i += 1;
            continue;
        }
        if c == ')' {
            if profondeur == 0 {
                return Err(ErreurAnalyse::ParentheseSansOuvrante);
            }
            if attend_operande {
                return Err(ErreurAnalyse::OperandeManquant { pos: i });
            }
            out.push(Jeton::ParFermante);
            profondeur -= 1;
            while fermetures.last() == Some(&profondeur) {
                fermetures.pop();
                out.push(Jeton::ParFermante);
                profondeur -= 1;
            }
            i += 1;
            continue;
        }

        // Nombre
        if est_car_nombre(c) {
            if !attend_operande {
                return Err(ErreurAnalyse::OperateurManquant { pos: i });
            }
            let (texte, fin) = lire_nombre(&chars, i)?;
            out.push(Jeton::Nombre(texte));
            i = fin;
            continue;
        }

        // Signe (position d’opérande)
        if attend_operande && (c == '+' || c == '-') {
            let mut negatif = false;
            while i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
                if chars[i] == '-' {
                    negatif = !negatif;
                }
                i += 1;
            }

            match chars.get(i) {
                Some(&d) if est_car_nombre(d) => {
                    let (texte, fin) = lire_nombre(&chars, i)?;
                    let texte = if negatif { format!("-{texte}") } else { texte };
                    out.push(Jeton::Nombre(texte));
                    i = fin;
                }
                Some('(') => {
                    if negatif {
                        if !table.contient(Op::Moins) {
                            return Err(ErreurAnalyse::OperateurInconnu("-".into()));
                        }
                        out.push(Jeton::ParOuvrante);
                        out.push(Jeton::nombre("0"));
                        out.push(Jeton::Operateur(Op::Moins));
                        profondeur += 1;
                        fermetures.push(profondeur);
                    }
                    // la '(' elle-même est lue au tour suivant
                }
                _ => return Err(ErreurAnalyse::OperandeManquant { pos: i }),
            }
            continue;
        }

        // Opérateur de la table (plus long d’abord)
        if let Some(op) = ops.iter().copied().find(|op| commence_par(&chars, i, op.symbole())) {
            if attend_operande {
                return Err(ErreurAnalyse::OperandeManquant { pos: i });
            }
            out.push(Jeton::Operateur(op));
            i += op.symbole().chars().count();
            continue;
        }

        // Opérateur connu mais absent de la table, sinon caractère inconnu
        let reste: String = chars[i..].iter().collect();
        if let Some(op) = Op::plus_long_prefixe(&reste) {
            return Err(ErreurAnalyse::OperateurInconnu(op.symbole().to_string()));
        }
        return Err(ErreurAnalyse::CaractereInattendu { car: c, pos: i });
    }

    if profondeur > 0 {
        return Err(ErreurAnalyse::ParenthesesNonFermees);
    }
    if matches!(out.last(), Some(Jeton::Operateur(_))) {
        return Err(ErreurAnalyse::OperandeManquant { pos: chars.len() });
    }

    Ok(out)
}

fn est_car_nombre(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn commence_par(chars: &[char], i: usize, symbole: &str) -> bool {
    symbole
        .chars()
        .enumerate()
        .all(|(k, sc)| chars.get(i + k) == Some(&sc))
}

/// Lit un nombre à partir de `debut` ; renvoie (texte, indice de fin).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(String, usize), ErreurAnalyse> {
    let mut fin = debut;
    while fin < chars.len() && est_car_nombre(chars[fin]) {
        fin += 1;
    }
    let texte: String = chars[debut..fin].iter().collect();

    let points = texte.chars().filter(|c| *c == '.').count();
    let chiffres = texte.chars().filter(char::is_ascii_digit).count();
    if points > 1 || chiffres == 0 {
        return Err(ErreurAnalyse::NombreInvalide(texte));
    }

    Ok((texte, fin))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| j.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
