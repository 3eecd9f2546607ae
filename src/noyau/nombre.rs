//! Contrat d’opérateurs sur une valeur numérique à représentation variable.
//!
//! `Nombre` est un variant étiqueté {entier 64 bits, flottant 64 bits, rationnel exact}.
//! Chaque opération commence par promouvoir la paire d’opérandes vers un genre commun :
//! - entier ∘ entier       => entier (arithmétique modulaire 2^64)
//! - un flottant présent   => flottant
//! - sinon (entier/rationnel) => rationnel exact
//!
//! puis route vers l’implémentation du genre. Les cas sans implémentation
//! (bit à bit hors entiers, exposant non entier en exact…) échouent avec
//! `OperationNonSupportee` ; diviseur nul => `DivisionParZero` pour tous les genres.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::{ErreurAnalyse, ErreurArithmetique};
use super::operateur::{Op, OpComparaison, OpUnaire};

/// Garde-fou : |exposant| maximal pour une puissance exacte.
pub const EXPOSANT_MAX: i64 = 10_000;

/// Garde-fou : taille estimée (en bits) du résultat d’une puissance exacte.
pub const BITS_PUISSANCE_MAX: u64 = 1 << 20;

#[derive(Clone, Debug, PartialEq)]
pub enum Nombre {
    Entier(i64),
    Flottant(f64),
    Rationnel(BigRational),
}

/// Paire d’opérandes ramenée à un genre commun.
enum Paire {
    Entiers(i64, i64),
    Flottants(f64, f64),
    Rationnels(BigRational, BigRational),
}

impl Paire {
    fn genre(&self) -> &'static str {
        match self {
            Paire::Entiers(..) => "entier",
            Paire::Flottants(..) => "flottant",
            Paire::Rationnels(..) => "rationnel",
        }
    }
}

fn promouvoir(a: &Nombre, b: &Nombre) -> Paire {
    use Nombre::*;

    match (a, b) {
        (Entier(x), Entier(y)) => Paire::Entiers(*x, *y),
        (Flottant(_), _) | (_, Flottant(_)) => Paire::Flottants(a.en_f64(), b.en_f64()),
        _ => Paire::Rationnels(a.en_rationnel(), b.en_rationnel()),
    }
}

/* ------------------------ Puissance exacte ------------------------ */

/// base^exp exact (exponentiation rapide), exp négatif => inverse.
/// L’appelant garantit base ≠ 0 quand exp < 0.
pub(crate) fn puissance_rationnelle(base: &BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = puissance_rationnelle(base, -exp);
        return pos.recip();
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base.clone();

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/// Puissance exacte avec contrôles (exposant entier, borné, 0^négatif).
pub(crate) fn puissance_exacte(
    base: &BigRational,
    exposant: &BigRational,
) -> Result<BigRational, ErreurArithmetique> {
    if !exposant.is_integer() {
        return Err(ErreurArithmetique::non_supportee(
            "** (exposant non entier)",
            "rationnel",
        ));
    }
    let e = exposant
        .to_integer()
        .to_i64()
        .filter(|e| e.abs() <= EXPOSANT_MAX)
        .ok_or_else(|| ErreurArithmetique::non_supportee("** (exposant trop grand)", "rationnel"))?;

    if e < 0 && base.is_zero() {
        return Err(ErreurArithmetique::DivisionParZero);
    }

    // chaîner `a ** b ** c` à gauche fait exploser la taille bien avant l’exposant
    let bits = base.numer().bits().max(base.denom().bits());
    if bits.saturating_mul(e.unsigned_abs()) > BITS_PUISSANCE_MAX {
        return Err(ErreurArithmetique::non_supportee(
            "** (résultat trop grand)",
            "rationnel",
        ));
    }
    Ok(puissance_rationnelle(base, e))
}

impl Nombre {
    pub fn genre(&self) -> &'static str {
        match self {
            Nombre::Entier(_) => "entier",
            Nombre::Flottant(_) => "flottant",
            Nombre::Rationnel(_) => "rationnel",
        }
    }

    pub fn est_zero(&self) -> bool {
        match self {
            Nombre::Entier(x) => *x == 0,
            Nombre::Flottant(x) => *x == 0.0,
            Nombre::Rationnel(r) => r.is_zero(),
        }
    }

    pub fn en_f64(&self) -> f64 {
        match self {
            Nombre::Entier(x) => *x as f64,
            Nombre::Flottant(x) => *x,
            Nombre::Rationnel(r) => r.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Flottant non fini => 0 (seul cas sans équivalent rationnel).
    pub fn en_rationnel(&self) -> BigRational {
        match self {
            Nombre::Entier(x) => BigRational::from_integer(BigInt::from(*x)),
            Nombre::Flottant(x) => BigRational::from_float(*x).unwrap_or_else(BigRational::zero),
            Nombre::Rationnel(r) => r.clone(),
        }
    }

    /* ------------------------ Indirection par genre d’opérateur ------------------------ */

    /// `self op autre`
    pub fn calc(&self, op: Op, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        match op {
            Op::Plus => Ok(self.plus(autre)),
            Op::Moins => Ok(self.moins(autre)),
            Op::Fois => Ok(self.fois(autre)),
            Op::Div => self.div(autre),
            Op::Mod => self.modulo(autre),
            Op::Puissance => self.puissance(autre),
            Op::EtBit => self.et_bit(autre),
            Op::OuBit => self.ou_bit(autre),
            Op::OuExclusif => self.ou_exclusif(autre),
            Op::DecalageGauche => self.decalage_gauche(autre),
            Op::DecalageDroite => self.decalage_droite(autre),
            Op::DecalageDroiteNonSigne => self.decalage_droite_non_signe(autre),
        }
    }

    /// `op self`
    pub fn calc_unaire(&self, op: OpUnaire) -> Result<Nombre, ErreurArithmetique> {
        match op {
            OpUnaire::Pos => Ok(self.pos()),
            OpUnaire::Neg => Ok(self.neg()),
            OpUnaire::NonBit => self.non_bit(),
            OpUnaire::Incremente => Ok(self.incremente()),
            OpUnaire::Decremente => Ok(self.decremente()),
        }
    }

    /// `self op autre` pour les comparaisons.
    pub fn cmp(&self, op: OpComparaison, autre: &Nombre) -> bool {
        let ord = self.compare(autre);
        match op {
            OpComparaison::Egal => ord == Some(Ordering::Equal),
            OpComparaison::Different => ord != Some(Ordering::Equal),
            OpComparaison::Inferieur => ord == Some(Ordering::Less),
            OpComparaison::Superieur => ord == Some(Ordering::Greater),
            OpComparaison::InferieurOuEgal => {
                matches!(ord, Some(Ordering::Less | Ordering::Equal))
            }
            OpComparaison::SuperieurOuEgal => {
                matches!(ord, Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }

    /* ------------------------ Arithmétique ------------------------ */

    pub fn plus(&self, autre: &Nombre) -> Nombre {
        match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Nombre::Entier(x.wrapping_add(y)),
            Paire::Flottants(x, y) => Nombre::Flottant(x + y),
            Paire::Rationnels(x, y) => Nombre::Rationnel(x + y),
        }
    }

    pub fn moins(&self, autre: &Nombre) -> Nombre {
        match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Nombre::Entier(x.wrapping_sub(y)),
            Paire::Flottants(x, y) => Nombre::Flottant(x - y),
            Paire::Rationnels(x, y) => Nombre::Rationnel(x - y),
        }
    }

    pub fn fois(&self, autre: &Nombre) -> Nombre {
        match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Nombre::Entier(x.wrapping_mul(y)),
            Paire::Flottants(x, y) => Nombre::Flottant(x * y),
            Paire::Rationnels(x, y) => Nombre::Rationnel(x * y),
        }
    }

    /// Division entière tronquée pour les entiers, exacte pour les rationnels.
    pub fn div(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        if autre.est_zero() {
            return Err(ErreurArithmetique::DivisionParZero);
        }
        Ok(match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Nombre::Entier(x.wrapping_div(y)),
            Paire::Flottants(x, y) => Nombre::Flottant(x / y),
            Paire::Rationnels(x, y) => Nombre::Rationnel(x / y),
        })
    }

    /// Reste tronqué (signe du dividende) pour les entiers et les flottants ;
    /// reste euclidien (jamais négatif) pour les rationnels.
    pub fn modulo(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        if autre.est_zero() {
            return Err(ErreurArithmetique::DivisionParZero);
        }
        Ok(match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Nombre::Entier(x.wrapping_rem(y)),
            Paire::Flottants(x, y) => Nombre::Flottant(x % y),
            Paire::Rationnels(x, y) => {
                let r = &x % &y;
                if r.is_negative() {
                    Nombre::Rationnel(r + y.abs())
                } else {
                    Nombre::Rationnel(r)
                }
            }
        })
    }

    pub fn puissance(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        match promouvoir(self, autre) {
            Paire::Entiers(x, y) => {
                let e = u32::try_from(y).map_err(|_| {
                    ErreurArithmetique::non_supportee("** (exposant négatif ou trop grand)", "entier")
                })?;
                Ok(Nombre::Entier(x.wrapping_pow(e)))
            }
            Paire::Flottants(x, y) => Ok(Nombre::Flottant(x.powf(y))),
            Paire::Rationnels(x, y) => puissance_exacte(&x, &y).map(Nombre::Rationnel),
        }
    }

    /* ------------------------ Bit à bit (entiers seulement) ------------------------ */

    fn entiers(
        &self,
        autre: &Nombre,
        op: Op,
        f: impl FnOnce(i64, i64) -> i64,
    ) -> Result<Nombre, ErreurArithmetique> {
        match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Ok(Nombre::Entier(f(x, y))),
            p => Err(ErreurArithmetique::non_supportee(op, p.genre())),
        }
    }

    pub fn et_bit(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        self.entiers(autre, Op::EtBit, |x, y| x & y)
    }

    pub fn ou_bit(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        self.entiers(autre, Op::OuBit, |x, y| x | y)
    }

    pub fn ou_exclusif(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        self.entiers(autre, Op::OuExclusif, |x, y| x ^ y)
    }

    // Décalages : nombre de bits masqué sur 0..63.
    pub fn decalage_gauche(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        self.entiers(autre, Op::DecalageGauche, |x, y| x.wrapping_shl((y & 63) as u32))
    }

    pub fn decalage_droite(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        self.entiers(autre, Op::DecalageDroite, |x, y| x.wrapping_shr((y & 63) as u32))
    }

    pub fn decalage_droite_non_signe(&self, autre: &Nombre) -> Result<Nombre, ErreurArithmetique> {
        self.entiers(autre, Op::DecalageDroiteNonSigne, |x, y| {
            ((x as u64) >> ((y & 63) as u32)) as i64
        })
    }

    /* ------------------------ Unaires ------------------------ */

    pub fn pos(&self) -> Nombre {
        self.clone()
    }

    pub fn neg(&self) -> Nombre {
        match self {
            Nombre::Entier(x) => Nombre::Entier(x.wrapping_neg()),
            Nombre::Flottant(x) => Nombre::Flottant(-x),
            Nombre::Rationnel(r) => Nombre::Rationnel(-r),
        }
    }

    pub fn non_bit(&self) -> Result<Nombre, ErreurArithmetique> {
        match self {
            Nombre::Entier(x) => Ok(Nombre::Entier(!x)),
            _ => Err(ErreurArithmetique::non_supportee(OpUnaire::NonBit, self.genre())),
        }
    }

    pub fn incremente(&self) -> Nombre {
        match self {
            Nombre::Entier(x) => Nombre::Entier(x.wrapping_add(1)),
            Nombre::Flottant(x) => Nombre::Flottant(x + 1.0),
            Nombre::Rationnel(r) => Nombre::Rationnel(r + BigRational::one()),
        }
    }

    pub fn decremente(&self) -> Nombre {
        match self {
            Nombre::Entier(x) => Nombre::Entier(x.wrapping_sub(1)),
            Nombre::Flottant(x) => Nombre::Flottant(x - 1.0),
            Nombre::Rationnel(r) => Nombre::Rationnel(r - BigRational::one()),
        }
    }

    /* ------------------------ Comparaisons ------------------------ */

    /// None seulement si un NaN est impliqué.
    pub fn compare(&self, autre: &Nombre) -> Option<Ordering> {
        match promouvoir(self, autre) {
            Paire::Entiers(x, y) => Some(x.cmp(&y)),
            Paire::Flottants(x, y) => x.partial_cmp(&y),
            Paire::Rationnels(x, y) => Some(x.cmp(&y)),
        }
    }

    pub fn egal(&self, autre: &Nombre) -> bool {
        self.cmp(OpComparaison::Egal, autre)
    }

    pub fn inferieur(&self, autre: &Nombre) -> bool {
        self.cmp(OpComparaison::Inferieur, autre)
    }

    pub fn superieur(&self, autre: &Nombre) -> bool {
        self.cmp(OpComparaison::Superieur, autre)
    }

    pub fn inferieur_ou_egal(&self, autre: &Nombre) -> bool {
        self.cmp(OpComparaison::InferieurOuEgal, autre)
    }

    pub fn superieur_ou_egal(&self, autre: &Nombre) -> bool {
        self.cmp(OpComparaison::SuperieurOuEgal, autre)
    }
}

/// Littéral => entier s’il tient sur 64 bits, sinon flottant.
impl FromStr for Nombre {
    type Err = ErreurAnalyse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(x) = s.parse::<i64>() {
            return Ok(Nombre::Entier(x));
        }
        s.parse::<f64>()
            .map(Nombre::Flottant)
            .map_err(|_| ErreurAnalyse::NombreInvalide(s.to_string()))
    }
}

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Entier(x) => write!(f, "{x}"),
            Nombre::Flottant(x) => write!(f, "{x}"),
            Nombre::Rationnel(r) => {
                if r.denom().is_one() {
                    write!(f, "{}", r.numer())
                } else if r.is_negative() {
                    write!(f, "-{}/{}", r.numer().abs(), r.denom())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
        }
    }
}
