//! Noyau de calcul d’expressions infixes
//!
//! Organisation interne :
//! - erreur.rs     : erreurs typées (analyse, arithmétique, évaluation)
//! - operateur.rs  : genres d’opérateurs (binaires, unaires, comparaisons)
//! - nombre.rs     : contrat d’opérateurs sur entier / flottant / rationnel
//! - jetons.rs     : tokenisation (politique des signes)
//! - priorites.rs  : tables de priorités
//! - rpn.rs        : shunting-yard
//! - calcul.rs     : calculatrice générique (réduction du postfixe)
//! - lecture.rs    : littéral décimal <-> rationnel exact
//! - exact.rs      : évaluation exacte + arrondi final
//! - eval.rs       : pipeline complet (interface)

pub mod calcul;
pub mod erreur;
pub mod eval;
pub mod exact;
pub mod jetons;
pub mod lecture;
pub mod nombre;
pub mod operateur;
pub mod priorites;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use calcul::{calculatrice_defaut, calculatrice_nombres, Calculatrice};
pub use erreur::{Erreur, ErreurAnalyse, ErreurArithmetique, ErreurEvaluation};
pub use eval::{eval_expression, DemarcheNoyau, Evaluation, Mode};
pub use exact::{fraction_exacte, resultat, resultat_exact, valeur_exacte};
pub use jetons::{tokenize, Jeton};
pub use nombre::Nombre;
pub use operateur::Op;
pub use priorites::TablePriorites;
pub use rpn::{to_postfix, to_postfix_str};
