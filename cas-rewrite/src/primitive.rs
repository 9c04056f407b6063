//! Functions to construct [`Integer`]s and [`Rational`]s from various types, and the exact
//! arithmetic helpers the canonicalizer folds constants with.

use rug::{ops::Pow, Integer, Rational};

/// Largest exponent magnitude that is folded into a literal. Larger powers stay symbolic.
pub const MAX_FOLD_EXPONENT: u32 = 1024;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Parses a decimal literal such as `12`, `2.5` or `3.` into an exact [`Rational`].
///
/// Characters other than ASCII digits and the first `.` are ignored; the tokenizer only ever
/// produces literals made of those.
pub fn rational_from_decimal(s: &str) -> Rational {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let mut numer = int(0);
    let mut scale = 0u32;

    for c in whole.chars().chain(frac.chars()) {
        if let Some(digit) = c.to_digit(10) {
            numer = numer * 10u32 + digit;
        }
    }
    for c in frac.chars() {
        if c.is_ascii_digit() {
            scale += 1;
        }
    }

    Rational::from((numer, int(10).pow(scale)))
}

/// Returns the number of times `factor` divides `n`, along with what is left of `n`.
fn remove_factor(mut n: Integer, factor: u32) -> (Integer, u32) {
    let mut count = 0;
    while n != 0 && n.is_divisible_u(factor) {
        n = n.div_exact_u(factor);
        count += 1;
    }
    (n, count)
}

/// Returns true if the rational has a finite decimal expansion (its reduced denominator has no
/// prime factors other than 2 and 5).
pub fn is_terminating(r: &Rational) -> bool {
    let (rest, _) = remove_factor(r.denom().clone(), 2);
    let (rest, _) = remove_factor(rest, 5);
    rest == 1
}

/// Formats a rational number using the canonical numeric text rule:
///
/// - integers print without a decimal point (`5`, `-12`)
/// - other terminating values print as an exact decimal (`2.5`, `-0.125`)
/// - everything else prints as a reduced fraction (`1/3`, `-2/7`)
pub fn fmt_rational(r: &Rational) -> String {
    if *r.denom() == 1 {
        return r.numer().to_string();
    }

    if !is_terminating(r) {
        return format!("{}/{}", r.numer(), r.denom());
    }

    let (rest, twos) = remove_factor(r.denom().clone(), 2);
    let (_, fives) = remove_factor(rest, 5);
    let places = twos.max(fives);

    // numer / denom = scaled / 10^places, exactly
    let scaled = Integer::from(r.numer() * int(10).pow(places)) / r.denom();
    let digits = scaled.clone().abs().to_string();
    let digits = format!("{:0>width$}", digits, width = places as usize + 1);
    let (whole, frac) = digits.split_at(digits.len() - places as usize);
    let sign = if scaled < 0 { "-" } else { "" };
    format!("{}{}.{}", sign, whole, frac)
}

/// Returns the exact `n`-th root of a non-negative integer, if there is one.
fn exact_root(n: &Integer, degree: u32) -> Option<Integer> {
    if *n < 0 {
        return None;
    }
    let root = n.clone().root(degree);
    if Integer::from((&root).pow(degree)) == *n {
        Some(root)
    } else {
        None
    }
}

/// Computes `base ^ exp` exactly, returning [`None`] if the result is not rational or is too
/// expensive to fold.
///
/// Integer exponents of any sign are folded (except `0` raised to a negative power). For a
/// rational exponent `p/q`, the principal `q`-th root of a non-negative base is taken if it is
/// exact.
pub fn exact_pow(base: &Rational, exp: &Rational) -> Option<Rational> {
    let p = exp.numer().to_i32()?;
    if p.unsigned_abs() > MAX_FOLD_EXPONENT {
        return None;
    }
    if *base == 0 && p < 0 {
        return None;
    }

    let rooted = if *exp.denom() == 1 {
        base.clone()
    } else {
        let q = exp.denom().to_u32().filter(|&q| q <= MAX_FOLD_EXPONENT)?;
        let numer = exact_root(base.numer(), q)?;
        let denom = exact_root(base.denom(), q)?;
        Rational::from((numer, denom))
    };

    Some(rooted.pow(p))
}
