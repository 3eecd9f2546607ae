//! Calculatrice générique : réduction d’un postfixe sur un type de valeur `T`.
//!
//! Une [`Calculatrice`] regroupe une table de priorités, une fonction de lecture
//! (texte d’opérande -> `T`) et une fonction de combinaison (`T`, op, `T`) -> `T`.
//! Elle ne garde aucun état : deux évaluations de la même chaîne donnent
//! le même résultat, et une instance peut être partagée entre threads.

use std::sync::OnceLock;

use tracing::debug;

use super::erreur::{Erreur, ErreurAnalyse, ErreurEvaluation};
use super::jetons::Jeton;
use super::nombre::Nombre;
use super::operateur::Op;
use super::priorites::TablePriorites;
use super::rpn::to_postfix_str;

type Lecture<T> = Box<dyn Fn(&str) -> Result<T, Erreur> + Send + Sync>;
type Combinaison<T> = Box<dyn Fn(T, Op, T) -> Result<T, Erreur> + Send + Sync>;

pub struct Calculatrice<T> {
    table: TablePriorites,
    lire: Lecture<T>,
    combiner: Combinaison<T>,
}

impl<T> Calculatrice<T> {
    pub fn nouvelle<L, C>(table: TablePriorites, lire: L, combiner: C) -> Self
    where
        L: Fn(&str) -> Result<T, Erreur> + Send + Sync + 'static,
        C: Fn(T, Op, T) -> Result<T, Erreur> + Send + Sync + 'static,
    {
        Self {
            table,
            lire: Box::new(lire),
            combiner: Box::new(combiner),
        }
    }

    pub fn table(&self) -> &TablePriorites {
        &self.table
    }

    /// Évalue une expression infixe (tokenize + RPN avec la table de la calculatrice).
    pub fn evaluer(&self, expression: &str) -> Result<T, Erreur> {
        let postfixe = to_postfix_str(expression, &self.table)?;
        debug!(expression, jetons = postfixe.len(), "évaluation");
        self.reduire(&postfixe)
    }

    /// Réduit une suite postfixe à une seule valeur.
    ///
    /// Le postfixe peut venir d’ailleurs que de [`to_postfix_str`] : sa forme est
    /// vérifiée ici (opérandes suffisants, aucune parenthèse, une seule valeur finale).
    pub fn reduire(&self, postfixe: &[Jeton]) -> Result<T, Erreur> {
        let mut pile: Vec<T> = Vec::new();

        for jeton in postfixe {
            match jeton {
                Jeton::Nombre(s) => pile.push((self.lire)(s)?),

                Jeton::Operateur(op) => {
                    // droite d’abord, puis gauche (ordre utile pour - / %)
                    let droite = pile.pop().ok_or(ErreurEvaluation::PileInsuffisante(*op))?;
                    let gauche = pile.pop().ok_or(ErreurEvaluation::PileInsuffisante(*op))?;
                    pile.push((self.combiner)(gauche, *op, droite)?);
                }

                Jeton::ParOuvrante | Jeton::ParFermante => {
                    return Err(ErreurEvaluation::JetonInattendu.into())
                }
            }
        }

        match (pile.pop(), pile.len()) {
            (Some(v), 0) => Ok(v),
            (None, _) => Err(ErreurEvaluation::PileInvalide { restants: 0 }.into()),
            (Some(_), n) => Err(ErreurEvaluation::PileInvalide { restants: n + 1 }.into()),
        }
    }
}

/* ------------------------ Calculatrices pré-câblées ------------------------ */

static DEFAUT: OnceLock<Calculatrice<f64>> = OnceLock::new();
static NOMBRES: OnceLock<Calculatrice<Nombre>> = OnceLock::new();

/// Calculatrice flottante (f64) sur la table par défaut.
/// La combinaison passe par le contrat `Nombre::calc` (division par zéro => erreur).
pub fn calculatrice_defaut() -> &'static Calculatrice<f64> {
    DEFAUT.get_or_init(|| calculatrice_flottante_avec(TablePriorites::defaut().clone()))
}

pub fn calculatrice_flottante_avec(table: TablePriorites) -> Calculatrice<f64> {
    Calculatrice::nouvelle(
        table,
        |s| {
            s.parse::<f64>()
                .map_err(|_| ErreurAnalyse::NombreInvalide(s.to_string()).into())
        },
        |a, op, b| Ok(Nombre::Flottant(a).calc(op, &Nombre::Flottant(b))?.en_f64()),
    )
}

/// Calculatrice « entiers d’abord » : les littéraux entiers restent des i64
/// (arithmétique modulaire), les décimaux passent en flottant.
pub fn calculatrice_nombres() -> &'static Calculatrice<Nombre> {
    NOMBRES.get_or_init(|| calculatrice_nombres_avec(TablePriorites::defaut().clone()))
}

/// Même chose sur une table fournie (ex: avec bit à bit / puissance).
pub fn calculatrice_nombres_avec(table: TablePriorites) -> Calculatrice<Nombre> {
    Calculatrice::nouvelle(
        table,
        |s| Ok(s.parse::<Nombre>()?),
        |a, op, b| Ok(a.calc(op, &b)?),
    )
}
