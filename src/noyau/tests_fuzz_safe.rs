//! Tests fuzz safe : aller-retour + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (`StdRng`, seed fixe)
//! - profondeur bornée
//! - budget temps par test (`ntest::timeout`)
//! - invariant clé : arbre aléatoire -> texte infixe -> noyau
//!   donne la même valeur qu’un évaluateur récursif direct sur l’arbre

use ntest::timeout;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::calcul::{calculatrice_defaut, calculatrice_nombres};
use super::erreur::{Erreur, ErreurArithmetique};
use super::exact::valeur_exacte;
use super::operateur::Op;
use super::priorites::TablePriorites;
use super::Nombre;

/* ------------------------ Arbre de référence ------------------------ */

#[derive(Clone, Debug)]
enum Arbre {
    Feuille(i64),
    Bin(Box<Arbre>, Op, Box<Arbre>),
}

const OPS_EXACTS: [Op; 5] = [Op::Plus, Op::Moins, Op::Fois, Op::Div, Op::Mod];

fn gen_arbre(rng: &mut StdRng, depth: usize, ops: &[Op]) -> Arbre {
    if depth == 0 || rng.gen_ratio(1, 4) {
        // petits entiers, 0 compris (division par zéro possible)
        return Arbre::Feuille(rng.gen_range(-9..=9));
    }
    let op = ops[rng.gen_range(0..ops.len())];
    Arbre::Bin(
        Box::new(gen_arbre(rng, depth - 1, ops)),
        op,
        Box::new(gen_arbre(rng, depth - 1, ops)),
    )
}

/// Rendu entièrement parenthésé.
fn rendre_plein(a: &Arbre) -> String {
    match a {
        Arbre::Feuille(n) => n.to_string(),
        Arbre::Bin(g, op, d) => format!("({} {} {})", rendre_plein(g), op, rendre_plein(d)),
    }
}

/// Rendu minimal : parenthèses seulement là où la table l’exige
/// (associativité à gauche : l’enfant droit de même priorité est parenthésé).
fn rendre_minimal(a: &Arbre, table: &TablePriorites) -> String {
    fn prio(a: &Arbre, table: &TablePriorites) -> u32 {
        match a {
            Arbre::Feuille(_) => u32::MAX,
            Arbre::Bin(_, op, _) => table.priorite_de(*op).unwrap(),
        }
    }

    match a {
        Arbre::Feuille(n) => n.to_string(),
        Arbre::Bin(g, op, d) => {
            let p = table.priorite_de(*op).unwrap();
            let mut sg = rendre_minimal(g, table);
            let mut sd = rendre_minimal(d, table);
            if prio(g, table) < p {
                sg = format!("({sg})");
            }
            if prio(d, table) <= p {
                sd = format!("({sd})");
            }
            format!("{sg} {op} {sd}")
        }
    }
}

/// Évaluateur récursif exact ; None = diviseur nul rencontré.
fn reference_exacte(a: &Arbre) -> Option<BigRational> {
    match a {
        Arbre::Feuille(n) => Some(BigRational::from_integer(BigInt::from(*n))),
        Arbre::Bin(g, op, d) => {
            let x = reference_exacte(g)?;
            let y = reference_exacte(d)?;
            match op {
                Op::Plus => Some(x + y),
                Op::Moins => Some(x - y),
                Op::Fois => Some(x * y),
                Op::Div if y.is_zero() => None,
                Op::Div => Some(x / y),
                Op::Mod if y.is_zero() => None,
                Op::Mod => {
                    // reste euclidien
                    let r = &x % &y;
                    Some(if r.is_negative() { r + y.abs() } else { r })
                }
                _ => unreachable!("opérateur hors campagne: {op}"),
            }
        }
    }
}

/// Évaluateur récursif entier 64 bits (modulaire).
fn reference_entiere(a: &Arbre) -> Option<i64> {
    match a {
        Arbre::Feuille(n) => Some(*n),
        Arbre::Bin(g, op, d) => {
            let x = reference_entiere(g)?;
            let y = reference_entiere(d)?;
            match op {
                Op::Plus => Some(x.wrapping_add(y)),
                Op::Moins => Some(x.wrapping_sub(y)),
                Op::Fois => Some(x.wrapping_mul(y)),
                Op::Div if y == 0 => None,
                Op::Div => Some(x.wrapping_div(y)),
                Op::Mod if y == 0 => None,
                Op::Mod => Some(x.wrapping_rem(y)),
                _ => unreachable!("opérateur hors campagne: {op}"),
            }
        }
    }
}

fn division_par_zero() -> Erreur {
    Erreur::Arithmetique(ErreurArithmetique::DivisionParZero)
}

/* ------------------------ Tests ------------------------ */

#[test]
#[timeout(5000)]
fn fuzz_aller_retour_exact() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let table = TablePriorites::defaut();

    let mut vus_ok = 0usize;
    let mut vus_err = 0usize;

    for _ in 0..300 {
        let arbre = gen_arbre(&mut rng, 5, &OPS_EXACTS);
        let attendu = reference_exacte(&arbre);

        for texte in [rendre_plein(&arbre), rendre_minimal(&arbre, table)] {
            match (valeur_exacte(&texte), &attendu) {
                (Ok(v), Some(r)) => {
                    assert_eq!(&v, r, "expr={texte:?}");
                    vus_ok += 1;
                }
                (Err(e), None) => {
                    assert_eq!(e, division_par_zero(), "expr={texte:?}");
                    vus_err += 1;
                }
                (obtenu, _) => panic!("expr={texte:?} obtenu={obtenu:?} attendu={attendu:?}"),
            }
        }
    }

    // un mix des deux, sinon le fuzz ne balaye rien
    assert!(vus_ok > 100, "trop peu de succès: {vus_ok}");
    assert!(vus_err > 0, "aucune division par zéro vue");
}

#[test]
#[timeout(5000)]
fn fuzz_aller_retour_entiers() {
    let mut rng = StdRng::seed_from_u64(0xBADC0DE);
    let table = TablePriorites::defaut();
    let c = calculatrice_nombres();

    for _ in 0..300 {
        let arbre = gen_arbre(&mut rng, 6, &OPS_EXACTS);
        let texte = rendre_minimal(&arbre, table);

        match (c.evaluer(&texte), reference_entiere(&arbre)) {
            (Ok(v), Some(r)) => assert_eq!(v, Nombre::Entier(r), "expr={texte:?}"),
            (Err(e), None) => assert_eq!(e, division_par_zero(), "expr={texte:?}"),
            (obtenu, attendu) => panic!("expr={texte:?} obtenu={obtenu:?} attendu={attendu:?}"),
        }
    }
}

#[test]
#[timeout(5000)]
fn fuzz_tables_personnalisees() {
    // priorités tirées au hasard : le rendu minimal suit la même table
    let mut rng = StdRng::seed_from_u64(42);
    let ops = [Op::Plus, Op::Moins, Op::Fois];

    for _ in 0..50 {
        let table: TablePriorites = ops.iter().map(|op| (*op, rng.gen_range(1..=3))).collect();
        let c = super::calcul::calculatrice_nombres_avec(table.clone());

        for _ in 0..10 {
            let arbre = gen_arbre(&mut rng, 4, &ops);
            let texte = rendre_minimal(&arbre, &table);
            let attendu = reference_entiere(&arbre).map(Nombre::Entier);
            assert_eq!(c.evaluer(&texte).ok(), attendu, "expr={texte:?} table={table:?}");
        }
    }
}

#[test]
#[timeout(5000)]
fn fuzz_determinisme() {
    let generer = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..100)
            .map(|_| rendre_plein(&gen_arbre(&mut rng, 4, &OPS_EXACTS)))
            .collect::<Vec<_>>()
    };

    // même seed => mêmes expressions
    let a = generer(7);
    assert_eq!(a, generer(7));

    // même expression => même sortie, y compris en flottant (bit à bit)
    for expr in &a {
        assert_eq!(valeur_exacte(expr), valeur_exacte(expr));
        match (calculatrice_defaut().evaluer(expr), calculatrice_defaut().evaluer(expr)) {
            (Ok(x), Ok(y)) => assert_eq!(x.to_bits(), y.to_bits(), "expr={expr:?}"),
            (Err(x), Err(y)) => assert_eq!(x, y),
            autre => panic!("non déterministe: {autre:?}"),
        }
    }
}

/* ------------------------ Helper somme balancée ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        items = items
            .chunks(2)
            .map(|c| match c {
                [a, b] => format!("({a}+{b})"),
                [a] => a.clone(),
                _ => unreachable!(),
            })
            .collect();
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
#[timeout(2000)]
fn fuzz_somme_balancee() {
    let expr = somme_balancee("1/2", 800);
    let v = valeur_exacte(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, BigRational::from_integer(BigInt::from(400)));
}

#[test]
#[timeout(2000)]
fn fuzz_imbrication_profonde() {
    // pas de récursion dans le noyau : 5000 niveaux passent
    let n = 5000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(calculatrice_defaut().evaluer(&expr).unwrap(), 1.0);

    let expr = format!("{}1{}", "-(".repeat(n), ")".repeat(n));
    assert_eq!(valeur_exacte(&expr).unwrap(), BigRational::from_integer(BigInt::from(1)));
}
