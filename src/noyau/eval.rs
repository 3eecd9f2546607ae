//! Noyau - évaluation (pipeline utilisé par l’interface)
//!
//! tokenize -> RPN -> réduction (selon le mode) -> texte
//!
//! Trois modes :
//! - Exact    : rationnels, table exacte, arrondi HALF_UP à la précision demandée
//! - Nombres  : entiers 64 bits d’abord (bit à bit possible), décimaux en flottant
//! - Flottant : f64 partout
//!
//! La démarche (jetons, postfixe) est produite avec la même table que le calcul.

use std::fmt;

use tracing::debug;

use super::calcul::{calculatrice_flottante_avec, calculatrice_nombres_avec};
use super::erreur::Erreur;
use super::exact::{calculatrice_exacte, table_exacte, verifier_precision};
use super::jetons::{format_jetons, tokenize_avec};
use super::lecture::{format_decimal, format_fraction};
use super::priorites::TablePriorites;
use super::rpn::to_postfix;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Exact,
    Nombres,
    Flottant,
}

impl Mode {
    pub const TOUS: [Mode; 3] = [Mode::Exact, Mode::Nombres, Mode::Flottant];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Exact => "Exact",
            Mode::Nombres => "Nombres",
            Mode::Flottant => "Flottant",
        })
    }
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub postfixe: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct Evaluation {
    pub resultat: String,
    /// Forme p/q, en mode exact seulement.
    pub fraction: Option<String>,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue `expr_str` selon `mode`.
///
/// `table` sert aux modes Nombres et Flottant ; le mode Exact a sa propre table.
/// `precision` ne concerne que le mode Exact.
pub fn eval_expression(
    expr_str: &str,
    mode: Mode,
    precision: usize,
    table: &TablePriorites,
) -> Result<Evaluation, Erreur> {
    let s = expr_str.trim();
    let table = match mode {
        Mode::Exact => table_exacte(),
        Mode::Nombres | Mode::Flottant => table,
    };

    // 1) Jetons
    let jetons = tokenize_avec(s, table)?;

    // 2) RPN
    let postfixe = to_postfix(&jetons, table)?;

    // 3) Réduction
    let (resultat, fraction, note) = match mode {
        Mode::Exact => {
            verifier_precision(precision)?;
            let v = calculatrice_exacte().reduire(&postfixe)?;
            (
                format_decimal(&v, precision),
                Some(format_fraction(&v)),
                format!("Rationnels exacts, un seul arrondi (HALF_UP, {precision} décimales)."),
            )
        }
        Mode::Nombres => {
            let v = calculatrice_nombres_avec(table.clone()).reduire(&postfixe)?;
            let note = format!("Résultat de genre {} (entiers sur 64 bits, modulo 2^64).", v.genre());
            (v.to_string(), None, note)
        }
        Mode::Flottant => {
            let v = calculatrice_flottante_avec(table.clone()).reduire(&postfixe)?;
            (v.to_string(), None, "Flottants IEEE 754 (f64).".to_string())
        }
    };

    debug!(expression = s, %mode, resultat = %resultat, "évaluation interface");

    Ok(Evaluation {
        resultat,
        fraction,
        demarche: DemarcheNoyau {
            jetons: format_jetons(&jetons),
            postfixe: format_jetons(&postfixe),
            note,
        },
    })
}
