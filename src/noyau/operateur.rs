// src/noyau/operateur.rs
//
// Genres d’opérateurs (binaires, unaires, comparaisons).
// Le symbole n’est lu qu’une fois (jetons.rs) ; ensuite tout circule en `Op`.

use std::fmt;

/// Opérateurs binaires reconnus par le noyau.
///
/// `**` = puissance, `^` = ou exclusif (bit à bit), `>>>` = décalage non signé.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Mod,
    Puissance,

    EtBit,
    OuBit,
    OuExclusif,
    DecalageGauche,
    DecalageDroite,
    DecalageDroiteNonSigne,
}

impl Op {
    pub const TOUS: [Op; 12] = [
        Op::Plus,
        Op::Moins,
        Op::Fois,
        Op::Div,
        Op::Mod,
        Op::Puissance,
        Op::EtBit,
        Op::OuBit,
        Op::OuExclusif,
        Op::DecalageGauche,
        Op::DecalageDroite,
        Op::DecalageDroiteNonSigne,
    ];

    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Moins => "-",
            Op::Fois => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Puissance => "**",
            Op::EtBit => "&",
            Op::OuBit => "|",
            Op::OuExclusif => "^",
            Op::DecalageGauche => "<<",
            Op::DecalageDroite => ">>",
            Op::DecalageDroiteNonSigne => ">>>",
        }
    }

    pub fn depuis_symbole(s: &str) -> Option<Op> {
        Op::TOUS.into_iter().find(|op| op.symbole() == s)
    }

    /// Plus long symbole connu au début de `reste` (tous genres confondus).
    pub(crate) fn plus_long_prefixe(reste: &str) -> Option<Op> {
        Op::TOUS
            .into_iter()
            .filter(|op| reste.starts_with(op.symbole()))
            .max_by_key(|op| op.symbole().len())
    }

    pub fn est_bit_a_bit(self) -> bool {
        matches!(
            self,
            Op::EtBit
                | Op::OuBit
                | Op::OuExclusif
                | Op::DecalageGauche
                | Op::DecalageDroite
                | Op::DecalageDroiteNonSigne
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

/// Opérateurs unaires du contrat (le tokenizer ne produit que le signe).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Pos,
    Neg,
    NonBit,
    Incremente,
    Decremente,
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Pos => "+",
            OpUnaire::Neg => "-",
            OpUnaire::NonBit => "~",
            OpUnaire::Incremente => "++",
            OpUnaire::Decremente => "--",
        }
    }
}

impl fmt::Display for OpUnaire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpComparaison {
    Egal,
    Different,
    Inferieur,
    Superieur,
    InferieurOuEgal,
    SuperieurOuEgal,
}

impl OpComparaison {
    pub fn symbole(self) -> &'static str {
        match self {
            OpComparaison::Egal => "==",
            OpComparaison::Different => "!=",
            OpComparaison::Inferieur => "<",
            OpComparaison::Superieur => ">",
            OpComparaison::InferieurOuEgal => "<=",
            OpComparaison::SuperieurOuEgal => ">=",
        }
    }

    pub fn depuis_symbole(s: &str) -> Option<OpComparaison> {
        use OpComparaison::*;
        [
            Egal,
            Different,
            Inferieur,
            Superieur,
            InferieurOuEgal,
            SuperieurOuEgal,
        ]
        .into_iter()
        .find(|op| op.symbole() == s)
    }
}

impl fmt::Display for OpComparaison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}
