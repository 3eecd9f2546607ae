// src/noyau/lecture.rs
//
// Lecture décimale exacte dans les deux sens :
// - littéral ("-12.375") -> rationnel exact (forme irréductible)
// - rationnel -> texte décimal à `digits` chiffres, arrondi au plus proche,
//   égalité => loin de zéro (HALF_UP). Seul endroit où l’on arrondit.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::erreur::ErreurAnalyse;

/* ------------------------ Littéral -> rationnel ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// "12", "-2.5", ".5", "3." -> rationnel exact.
pub fn lire_rationnel(s: &str) -> Result<BigRational, ErreurAnalyse> {
    let invalide = || ErreurAnalyse::NombreInvalide(s.to_string());

    let (negatif, corps) = match s.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));
    let chiffres_ok = |t: &str| t.chars().all(|c| c.is_ascii_digit());
    if (ent.is_empty() && frac.is_empty()) || !chiffres_ok(ent) || !chiffres_ok(frac) {
        return Err(invalide());
    }

    // "12.375" -> 12375 / 10^3
    let tous: String = [ent, frac].concat();
    let mut numer = BigInt::parse_bytes(tous.as_bytes(), 10).ok_or_else(invalide)?;
    if negatif {
        numer = -numer;
    }

    Ok(BigRational::new(numer, pow10(frac.len())))
}

/* ------------------------ Rationnel -> décimal ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = round(r * 10^digits), égalité loin de zéro.
pub fn rational_scaled_half_up(r: &BigRational, digits: usize) -> BigInt {
    let scaled_num = r.numer().abs() * pow10(digits);
    let d = r.denom();

    let mut q = &scaled_num / d;
    let reste = &scaled_num % d;
    if reste * 2u32 >= *d {
        q += 1u32;
    }

    if r.is_negative() {
        -q
    } else {
        q
    }
}

/// Texte décimal arrondi (jamais "-0.00" : BigInt n’a pas de zéro négatif).
pub fn format_decimal(r: &BigRational, digits: usize) -> String {
    scaled_to_decimal(rational_scaled_half_up(r, digits), digits)
}

/// Forme fraction : "n" si entier, sinon "p/q" (signe devant).
pub fn format_fraction(r: &BigRational) -> String {
    if r.is_integer() {
        return format!("{}", r.numer());
    }
    format!("{}/{}", r.numer(), r.denom())
}
