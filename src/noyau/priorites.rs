// src/noyau/priorites.rs
//
// Table de priorités : opérateur -> entier (plus grand = lie plus fort).
// La table n’est jamais modifiée pendant une conversion : les variantes
// (`avec`, `fusion`) produisent une nouvelle table.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::erreur::ErreurAnalyse;
use super::operateur::Op;

/// Table par défaut : `+ -` = 1, `* / %` = 2.
pub const PRIORITES_DEFAUT: [(Op, u32); 5] = [
    (Op::Plus, 1),
    (Op::Moins, 1),
    (Op::Fois, 2),
    (Op::Div, 2),
    (Op::Mod, 2),
];

/// Tous les opérateurs, étagés comme en C/Java :
/// `|` < `^` < `&` < décalages < `+ -` < `* / %` < `**`.
pub const PRIORITES_COMPLETES: [(Op, u32); 12] = [
    (Op::OuBit, 1),
    (Op::OuExclusif, 2),
    (Op::EtBit, 3),
    (Op::DecalageGauche, 4),
    (Op::DecalageDroite, 4),
    (Op::DecalageDroiteNonSigne, 4),
    (Op::Plus, 5),
    (Op::Moins, 5),
    (Op::Fois, 6),
    (Op::Div, 6),
    (Op::Mod, 6),
    (Op::Puissance, 7),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TablePriorites {
    entrees: HashMap<Op, u32>,
}

static TABLE_DEFAUT: OnceLock<TablePriorites> = OnceLock::new();
static TABLE_COMPLETE: OnceLock<TablePriorites> = OnceLock::new();

impl TablePriorites {
    pub fn vide() -> Self {
        Self {
            entrees: HashMap::new(),
        }
    }

    /// Table par défaut partagée (lecture seule).
    pub fn defaut() -> &'static TablePriorites {
        TABLE_DEFAUT.get_or_init(|| PRIORITES_DEFAUT.into_iter().collect())
    }

    pub fn complete() -> &'static TablePriorites {
        TABLE_COMPLETE.get_or_init(|| PRIORITES_COMPLETES.into_iter().collect())
    }

    /// Construit une table depuis des paires (symbole, priorité).
    /// Un symbole inconnu du noyau est refusé.
    pub fn depuis_symboles<'a, I>(paires: I) -> Result<Self, ErreurAnalyse>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        paires
            .into_iter()
            .map(|(s, p)| {
                Op::depuis_symbole(s)
                    .map(|op| (op, p))
                    .ok_or_else(|| ErreurAnalyse::OperateurInconnu(s.to_string()))
            })
            .collect()
    }

    pub fn priorite_de(&self, op: Op) -> Result<u32, ErreurAnalyse> {
        self.entrees
            .get(&op)
            .copied()
            .ok_or_else(|| ErreurAnalyse::OperateurInconnu(op.symbole().to_string()))
    }

    pub fn contient(&self, op: Op) -> bool {
        self.entrees.contains_key(&op)
    }

    /// Opérateurs de la table, symboles les plus longs d’abord.
    pub fn operateurs(&self) -> Vec<Op> {
        let mut ops: Vec<Op> = self.entrees.keys().copied().collect();
        ops.sort_by(|a, b| {
            b.symbole()
                .len()
                .cmp(&a.symbole().len())
                .then_with(|| a.cmp(b))
        });
        ops
    }

    /// Copie avec une entrée ajoutée ou remplacée.
    pub fn avec(mut self, op: Op, priorite: u32) -> Self {
        self.entrees.insert(op, priorite);
        self
    }

    /// Copie de `self` où les entrées de `autre` l’emportent.
    pub fn fusion(&self, autre: &TablePriorites) -> Self {
        let mut entrees = self.entrees.clone();
        entrees.extend(autre.entrees.iter().map(|(op, p)| (*op, *p)));
        Self { entrees }
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}

impl Default for TablePriorites {
    fn default() -> Self {
        TablePriorites::defaut().clone()
    }
}

impl FromIterator<(Op, u32)> for TablePriorites {
    fn from_iter<I: IntoIterator<Item = (Op, u32)>>(iter: I) -> Self {
        Self {
            entrees: iter.into_iter().collect(),
        }
    }
}
