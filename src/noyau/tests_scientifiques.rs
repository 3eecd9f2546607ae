//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps par test
//! - tailles bornées (profondeur, longueur, exposants)
//! - précision limitée pour l’affichage décimal

use ntest::timeout;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::calcul::calculatrice_defaut;
use super::erreur::{Erreur, ErreurArithmetique};
use super::exact::{fraction_exacte, resultat, resultat_exact, valeur_exacte, PRECISION_MAX};

fn exact_ok(expr: &str, precision: usize) -> String {
    resultat_exact(expr, precision).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_fraction(expr: &str, attendu: &str) {
    let f = fraction_exacte(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert_eq!(f, attendu, "expr={expr:?}");
}

fn q(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/* ------------------------ Propriétés de base ------------------------ */

#[test]
fn sci_proprietes_de_reference() {
    assert_eq!(calculatrice_defaut().evaluer("8-3-2").unwrap(), 3.0);
    assert_eq!(calculatrice_defaut().evaluer("2+3*4").unwrap(), 14.0);
    assert_eq!(calculatrice_defaut().evaluer("(2+3)*4").unwrap(), 20.0);
    assert_eq!(exact_ok("1/3+1/3+1/3", 10), "1.0000000000");
    assert_eq!(
        resultat_exact("5/0", 10),
        Err(Erreur::Arithmetique(ErreurArithmetique::DivisionParZero))
    );
    assert!(matches!(resultat_exact("(1+2", 10), Err(Erreur::Analyse(_))));
}

/* ------------------------ Cohérence algébrique (zéro) ------------------------ */

#[test]
fn sci_zero_algebrique() {
    assert_fraction("(1/2 + 1/3) - 5/6", "0");
    assert_fraction("(2/3 * 3/4) - 1/2", "0");
    assert_fraction("0.1 * 3 - 0.3", "0");
    assert_fraction("(1/7 + 2/7) * 7 - 3", "0");
    assert_fraction("2 ** 10 / 2 ** 10 - 1", "0");
}

#[test]
#[timeout(3000)]
fn sci_lois_algebriques_aleatoires() {
    // commutativité, associativité, distributivité, sur des décimaux aléatoires
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let decimal = |rng: &mut StdRng| {
        let n: i32 = rng.gen_range(-9999..=9999);
        let k: u32 = rng.gen_range(0..4);
        format!("({n}/{})", 10u32.pow(k))
    };

    for _ in 0..100 {
        let (a, b, c) = (decimal(&mut rng), decimal(&mut rng), decimal(&mut rng));
        let v = |s: String| valeur_exacte(&s).unwrap_or_else(|e| panic!("expr={s:?} err={e}"));

        assert_eq!(v(format!("{a}+{b}")), v(format!("{b}+{a}")));
        assert_eq!(v(format!("{a}*{b}")), v(format!("{b}*{a}")));
        assert_eq!(v(format!("({a}+{b})+{c}")), v(format!("{a}+({b}+{c})")));
        assert_eq!(v(format!("{a}*({b}+{c})")), v(format!("{a}*{b}+{a}*{c}")));
        assert_eq!(v(format!("{a}-{b}+{b}")), v(a.clone()));
    }
}

/* ------------------------ Affichage décimal ------------------------ */

#[test]
fn sci_forme_de_l_affichage() {
    for precision in [0usize, 1, 5, 16, 40] {
        for expr in ["1/3", "-2/3", "22/7", "-1/1000000", "123456789/1000"] {
            let t = exact_ok(expr, precision);
            let decimales = t.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
            assert_eq!(decimales, precision, "expr={expr:?} t={t:?}");
            // jamais de zéro négatif
            if t.chars().all(|c| c == '-' || c == '0' || c == '.') {
                assert!(!t.starts_with('-'), "zéro négatif: expr={expr:?} t={t:?}");
            }
        }
    }
}

#[test]
fn sci_arrondi_half_up_symetrique() {
    // égalité => loin de zéro, des deux côtés
    assert_eq!(exact_ok("0.125", 2), "0.13");
    assert_eq!(exact_ok("-0.125", 2), "-0.13");
    assert_eq!(exact_ok("2.5", 0), "3");
    assert_eq!(exact_ok("-2.5", 0), "-3");
    assert_eq!(exact_ok("0.0049", 2), "0.00");
    assert_eq!(exact_ok("-0.0049", 2), "0.00");
}

#[test]
fn sci_resultat_forme_courte() {
    assert_eq!(resultat("3 ** 2 - 4 * 2").unwrap(), "1");
    assert_eq!(resultat("10 / 4").unwrap(), "2.5000000000000000");
    assert_eq!(resultat("2/3").unwrap(), "0.6666666666666667");
}

#[test]
fn sci_accord_avec_le_flottant() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let a: i32 = rng.gen_range(-1000..=1000);
        let b: i32 = rng.gen_range(1..=1000);
        let c: i32 = rng.gen_range(-1000..=1000);
        let expr = format!("{a}/{b}*{c}-{b}");

        let exact = valeur_exacte(&expr).unwrap().to_f64().unwrap();
        let flottant = calculatrice_defaut().evaluer(&expr).unwrap();
        let ecart = (exact - flottant).abs();
        assert!(ecart <= 1e-9 * exact.abs().max(1.0), "expr={expr:?} ecart={ecart}");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
#[timeout(2000)]
fn sci_stress_taille_somme() {
    let expr = vec!["1/2"; 2000].join(" + ");
    assert_eq!(valeur_exacte(&expr).unwrap(), q(1000));
}

#[test]
#[timeout(2000)]
fn sci_stress_bigint() {
    // gros numérateur contrôlé (100 chiffres)
    let big = "9".repeat(100);
    let expr = format!("{big}/7 + 1/7");
    assert_fraction(&expr, &format!("1{}/7", "0".repeat(100)));
}

#[test]
#[timeout(2000)]
fn sci_stress_precision_max() {
    let t = exact_ok("1/7", PRECISION_MAX);
    assert_eq!(t.len(), 2 + PRECISION_MAX);
    assert!(t.starts_with("0.142857142857"));
    assert!(resultat_exact("1/7", PRECISION_MAX + 1).is_err());
}

#[test]
#[timeout(2000)]
fn sci_stress_puissances_bornees() {
    let v = valeur_exacte("2 ** 10000").unwrap();
    assert_eq!(v.numer().bits(), 10001);
    assert!(matches!(
        resultat_exact("2 ** 10001", 0),
        Err(Erreur::Arithmetique(ErreurArithmetique::OperationNonSupportee { .. }))
    ));
    assert_eq!(exact_ok("(1/2) ** -3", 0), "8");
}
