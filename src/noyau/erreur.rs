//! Erreurs du noyau.
//!
//! Trois familles, jamais retentées en interne (entrées déterministes) :
//! - [`ErreurAnalyse`]      : entrée mal formée (jetons, parenthèses, opérateurs)
//! - [`ErreurArithmetique`] : division par zéro, opération non supportée
//! - [`ErreurEvaluation`]   : postfixe mal formé fourni directement à une calculatrice
//!
//! [`Erreur`] les regroupe ; les conversions `#[from]` permettent `?` partout.

use thiserror::Error;

use super::operateur::Op;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurAnalyse {
    #[error("Entrée vide")]
    Vide,

    #[error("caractère inattendu: '{car}' (position {pos})")]
    CaractereInattendu { car: char, pos: usize },

    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),

    #[error("opérateur inconnu: {0:?}")]
    OperateurInconnu(String),

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseSansOuvrante,

    /// Deux opérandes (ou `)` puis `(`) sans opérateur entre eux.
    #[error("opérateur manquant (position {pos})")]
    OperateurManquant { pos: usize },

    /// Opérateur sans opérande à sa droite, ou `()`.
    #[error("opérande manquant (position {pos})")]
    OperandeManquant { pos: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurArithmetique {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("opération non supportée: {op} sur {genre}")]
    OperationNonSupportee { op: String, genre: &'static str },

    #[error("précision trop grande: {demandee} (max {max})")]
    PrecisionTropGrande { demandee: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEvaluation {
    /// Un opérateur n'a pas trouvé ses deux opérandes sur la pile.
    #[error("expression invalide: opérandes manquants pour {0}")]
    PileInsuffisante(Op),

    #[error("expression invalide: {restants} valeur(s) en fin de réduction")]
    PileInvalide { restants: usize },

    #[error("parenthèse inattendue en postfixe")]
    JetonInattendu,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Erreur {
    #[error(transparent)]
    Analyse(#[from] ErreurAnalyse),

    #[error(transparent)]
    Arithmetique(#[from] ErreurArithmetique),

    #[error(transparent)]
    Evaluation(#[from] ErreurEvaluation),
}

impl ErreurArithmetique {
    pub(crate) fn non_supportee(op: impl ToString, genre: &'static str) -> Self {
        ErreurArithmetique::OperationNonSupportee {
            op: op.to_string(),
            genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_vers_erreur() {
        let e: Erreur = ErreurAnalyse::ParenthesesNonFermees.into();
        assert!(matches!(e, Erreur::Analyse(_)));
        assert_eq!(e.to_string(), "parenthèses non fermées");

        let e: Erreur = ErreurArithmetique::DivisionParZero.into();
        assert!(matches!(e, Erreur::Arithmetique(_)));
        assert!(e.to_string().contains("division par zéro"));

        let e: Erreur = ErreurEvaluation::PileInvalide { restants: 2 }.into();
        assert!(e.to_string().contains("2 valeur(s)"));
    }

    #[test]
    fn message_non_supportee() {
        let e = ErreurArithmetique::non_supportee(Op::EtBit, "flottant");
        assert_eq!(e.to_string(), "opération non supportée: & sur flottant");
    }

    fn _send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn erreur_est_send_sync_static() {
        _send_sync_static::<Erreur>();
    }
}
