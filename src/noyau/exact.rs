//! Évaluation exacte : calculatrice pré-câblée sur les rationnels.
//!
//! Les littéraux deviennent des rationnels exacts, toute la réduction reste
//! exacte (forme irréductible après chaque opération), et l’unique arrondi
//! a lieu au formatage final, à la précision demandée (HALF_UP).
//!
//! Table : `+ -` = 1, `* / %` = 2, `** ^` = 3 (exposant entier).
//! Le ou exclusif n’a pas de sens sur les rationnels : ici `^` est la puissance.

use std::sync::OnceLock;

use num_rational::BigRational;
use tracing::debug;

use super::calcul::Calculatrice;
use super::erreur::{Erreur, ErreurArithmetique};
use super::lecture::{format_decimal, format_fraction, lire_rationnel};
use super::nombre::Nombre;
use super::operateur::Op;
use super::priorites::TablePriorites;

/// Précision utilisée par [`resultat`].
pub const PRECISION_DEFAUT: usize = 16;

/// Garde-fou : nombre de décimales maximal.
pub const PRECISION_MAX: usize = 1000;

pub const PRIORITES_EXACTES: [(Op, u32); 7] = [
    (Op::Plus, 1),
    (Op::Moins, 1),
    (Op::Fois, 2),
    (Op::Div, 2),
    (Op::Mod, 2),
    (Op::Puissance, 3),
    (Op::OuExclusif, 3),
];

static TABLE_EXACTE: OnceLock<TablePriorites> = OnceLock::new();
static CALCULATRICE_EXACTE: OnceLock<Calculatrice<BigRational>> = OnceLock::new();

pub fn table_exacte() -> &'static TablePriorites {
    TABLE_EXACTE.get_or_init(|| PRIORITES_EXACTES.into_iter().collect())
}

/// Combinaison exacte : passe par le contrat `Nombre` (genre rationnel).
fn combiner_exact(a: BigRational, op: Op, b: BigRational) -> Result<BigRational, Erreur> {
    let op = match op {
        Op::OuExclusif => Op::Puissance,
        autre => autre,
    };
    let v = Nombre::Rationnel(a).calc(op, &Nombre::Rationnel(b))?;
    Ok(rationnel_de(v, op)?)
}

/// Un résultat qui a quitté le genre rationnel est refusé, jamais converti.
fn rationnel_de(v: Nombre, op: Op) -> Result<BigRational, ErreurArithmetique> {
    match v {
        Nombre::Rationnel(r) => Ok(r),
        autre => Err(ErreurArithmetique::non_supportee(op, autre.genre())),
    }
}

pub fn calculatrice_exacte() -> &'static Calculatrice<BigRational> {
    CALCULATRICE_EXACTE.get_or_init(|| {
        Calculatrice::nouvelle(
            table_exacte().clone(),
            |s| Ok(lire_rationnel(s)?),
            combiner_exact,
        )
    })
}

pub fn verifier_precision(precision: usize) -> Result<(), ErreurArithmetique> {
    if precision > PRECISION_MAX {
        return Err(ErreurArithmetique::PrecisionTropGrande {
            demandee: precision,
            max: PRECISION_MAX,
        });
    }
    Ok(())
}

/// Valeur exacte (rationnel irréductible) de l’expression.
pub fn valeur_exacte(expression: &str) -> Result<BigRational, Erreur> {
    calculatrice_exacte().evaluer(expression)
}

/// Résultat décimal à `precision` chiffres après la virgule.
///
/// ```
/// use calculatrice_exacte::noyau::resultat_exact;
/// assert_eq!(resultat_exact("1/3+1/3+1/3", 10).unwrap(), "1.0000000000");
/// ```
pub fn resultat_exact(expression: &str, precision: usize) -> Result<String, Erreur> {
    verifier_precision(precision)?;
    let v = valeur_exacte(expression)?;
    let texte = format_decimal(&v, precision);
    debug!(expression, precision, resultat = %texte, "résultat exact");
    Ok(texte)
}

/// Précision par défaut ; un résultat entier s’affiche sans partie décimale.
pub fn resultat(expression: &str) -> Result<String, Erreur> {
    let v = valeur_exacte(expression)?;
    if v.is_integer() {
        return Ok(format_fraction(&v));
    }
    Ok(format_decimal(&v, PRECISION_DEFAUT))
}

/// Forme fraction irréductible : "p/q" ou "n".
pub fn fraction_exacte(expression: &str) -> Result<String, Erreur> {
    valeur_exacte(expression).map(|v| format_fraction(&v))
}
