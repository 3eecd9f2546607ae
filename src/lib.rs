//! Calculatrice exacte : moteur d’expressions infixes (noyau) et réglages.
//!
//! ```
//! use calculatrice_exacte::noyau::{calculatrice_defaut, resultat_exact};
//!
//! assert_eq!(calculatrice_defaut().evaluer("2+3*4").unwrap(), 14.0);
//! assert_eq!(resultat_exact("1/3+1/3+1/3", 10).unwrap(), "1.0000000000");
//! ```

pub mod noyau;
pub mod reglages;
