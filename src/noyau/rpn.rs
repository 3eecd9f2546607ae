// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> RPN (postfixe)
//
// Règles:
// - nombre : sortie directe
// - '(' : empilée
// - ')' : dépile jusqu’à '(' (qui est jetée)
// - opérateur : dépile tant que le sommet n’est pas '(' et que
//   priorité(sommet) >= priorité(op) ; à priorité égale on dépile,
//   donc tous les opérateurs sont associatifs à gauche ("8-3-2" = 3)
// - fin : vide la pile ; une '(' restante est une erreur
//
// La table décide seule du groupement : aucune priorité n’est codée ici.

use tracing::trace;

use super::erreur::ErreurAnalyse;
use super::jetons::{tokenize_avec, Jeton};
use super::priorites::TablePriorites;

/// Convertit une suite de jetons infixes en RPN.
///
/// Exemple:
///   jetons: [LPar, 1, +, 2, RPar, *, 5]
///   rpn:    [1, 2, +, 5, *]
pub fn to_postfix(jetons: &[Jeton], table: &TablePriorites) -> Result<Vec<Jeton>, ErreurAnalyse> {
    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut pile: Vec<Jeton> = Vec::new();

    for jeton in jetons.iter().cloned() {
        match jeton {
            Jeton::Nombre(_) => out.push(jeton),

            Jeton::ParOuvrante => pile.push(jeton),

            Jeton::ParFermante => loop {
                match pile.pop() {
                    Some(Jeton::ParOuvrante) => break,
                    Some(top) => out.push(top),
                    None => return Err(ErreurAnalyse::ParentheseSansOuvrante),
                }
            },

            Jeton::Operateur(op) => {
                let p_op = table.priorite_de(op)?;

                while let Some(Jeton::Operateur(top)) = pile.last() {
                    if table.priorite_de(*top)? < p_op {
                        break;
                    }
                    if let Some(top) = pile.pop() {
                        out.push(top);
                    }
                }

                pile.push(jeton);
            }
        }
    }

    // vide la pile
    while let Some(top) = pile.pop() {
        if matches!(top, Jeton::ParOuvrante) {
            return Err(ErreurAnalyse::ParenthesesNonFermees);
        }
        out.push(top);
    }

    trace!(postfixe = %super::jetons::format_jetons(&out), "conversion postfixe");
    Ok(out)
}

/// Tokenize (avec la même table) puis convertit en RPN.
pub fn to_postfix_str(expression: &str, table: &TablePriorites) -> Result<Vec<Jeton>, ErreurAnalyse> {
    let jetons = tokenize_avec(expression, table)?;
    to_postfix(&jetons, table)
}
