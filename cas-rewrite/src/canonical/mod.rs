//! Normalization of expressions into canonical form.
//!
//! The canonical form of an expression is reached bottom-up. At each node:
//!
//! - [`Expr::Add`] and [`Expr::Mul`] are flattened, their numeric literals are folded into one,
//!   identities are dropped, and the remaining operands are sorted by [`order`]. The folded
//!   literal trails a sum and leads a product. An operation left with a single operand is replaced
//!   by that operand.
//! - `0` anywhere in a product makes the whole product `0`.
//! - Powers, differences and quotients of numbers are folded when the result is exact (see
//!   [`exact_pow`]), and the identities `a ** 0 = 1`, `a ** 1 = a`, `1 ** a = 1`, `a - 0 = a`,
//!   `a - a = 0` and `a / 1 = a` are applied.
//! - Every other node keeps its children in order.
//!
//! Canonicalization never fails and is idempotent.

mod order;

use crate::expr::{Expr, Primary};
use crate::primitive::{exact_pow, rat};

pub use order::order;

/// Returns the canonical form of the expression.
pub fn canonicalize(expr: Expr) -> Expr {
    normalize_node(expr.map_children(canonicalize))
}

/// Normalizes the top node of an expression whose children are already canonical.
///
/// This is the step [`canonicalize`] applies at every node. The rewriter uses it directly to
/// re-normalize a parent after one of its children was replaced.
pub fn normalize_node(expr: Expr) -> Expr {
    match expr {
        Expr::Add(terms) => normalize_add(terms),
        Expr::Mul(factors) => normalize_mul(factors),
        Expr::Exp(base, exp) => normalize_pow(*base, *exp),
        Expr::Sub(lhs, rhs) => normalize_sub(*lhs, *rhs),
        Expr::Div(lhs, rhs) => normalize_div(*lhs, *rhs),
        expr => expr,
    }
}

/// Returns true if the expression is already in canonical form.
pub fn is_canonical(expr: &Expr) -> bool {
    canonicalize(expr.clone()).structurally_eq(expr)
}

fn normalize_add(terms: Vec<Expr>) -> Expr {
    let mut sum = rat(0);
    let mut rest = Vec::with_capacity(terms.len());
    for term in terms {
        match term {
            Expr::Add(inner) => rest.extend(inner),
            term => rest.push(term),
        }
    }

    rest.retain(|term| match term {
        Expr::Primary(Primary::Number(n)) => {
            sum += n;
            false
        },
        _ => true,
    });
    rest.sort_by(order);

    if sum != 0 {
        rest.push(Expr::rational(sum));
    }
    Expr::Add(rest).downgrade()
}

fn normalize_mul(factors: Vec<Expr>) -> Expr {
    let mut product = rat(1);
    let mut rest = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor {
            Expr::Mul(inner) => rest.extend(inner),
            factor => rest.push(factor),
        }
    }

    rest.retain(|factor| match factor {
        Expr::Primary(Primary::Number(n)) => {
            product *= n;
            false
        },
        _ => true,
    });

    if product == 0 {
        return Expr::num(0);
    }

    rest.sort_by(order);
    if product != 1 {
        rest.insert(0, Expr::rational(product));
    }
    Expr::Mul(rest).downgrade()
}

fn normalize_pow(base: Expr, exp: Expr) -> Expr {
    if let (Some(b), Some(e)) = (base.as_number(), exp.as_number()) {
        if let Some(value) = exact_pow(b, e) {
            return Expr::rational(value);
        }
    }

    if exp.is_zero() || base.is_one() {
        Expr::num(1)
    } else if exp.is_one() {
        base
    } else if base.is_zero() && exp.as_number().is_some_and(|n| *n > 0) {
        Expr::num(0)
    } else {
        Expr::pow(base, exp)
    }
}

fn normalize_sub(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return Expr::rational(rat(l - r));
    }

    if rhs.is_zero() {
        lhs
    } else if lhs.structurally_eq(&rhs) {
        Expr::num(0)
    } else {
        lhs - rhs
    }
}

fn normalize_div(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        if *r != 0 {
            return Expr::rational(rat(l / r));
        }
    }

    if rhs.is_one() {
        lhs
    } else {
        lhs / rhs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn canon(s: &str) -> String {
        canonicalize(s.parse::<Expr>().unwrap()).to_string()
    }

    #[test]
    fn folds_and_sorts_sums() {
        assert_eq!(canon("3 + y + 2 + x"), "x + y + 5");
        assert_eq!(canon("x + 0"), "x");
        assert_eq!(canon("0 + 0"), "0");
        assert_eq!(canon("(x + 1) + (y + -1)"), "x + y");
    }

    #[test]
    fn folds_and_sorts_products() {
        assert_eq!(canon("y * 3 * x * 2"), "6 * x * y");
        assert_eq!(canon("y * 0"), "0");
        assert_eq!(canon("(x + y) * 1"), "x + y");
        assert_eq!(canon("x * (2 * y)"), "2 * x * y");
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(canon("0.1 + 0.2"), "0.3");
        assert_eq!(canon("1 / 3"), "1/3");
        assert_eq!(canon("2 ** 10"), "1024");
        assert_eq!(canon("9 ** 0.5"), "3");
        assert_eq!(canon("2 ** 0.5"), "2 ** 0.5");
        assert_eq!(canon("1 / 0"), "1 / 0");
    }

    #[test]
    fn binary_identities() {
        assert_eq!(canon("x ** 1"), "x");
        assert_eq!(canon("x ** 0"), "1");
        assert_eq!(canon("1 ** x"), "1");
        assert_eq!(canon("x - 0"), "x");
        assert_eq!(canon("(x + y) - (y + x)"), "0");
        assert_eq!(canon("x / 1"), "x");
    }

    #[test]
    fn noncommutative_children_keep_order() {
        assert_eq!(canon("Vector(y, x)"), "Vector(y, x)");
        assert_eq!(canon("log(2, x + 0)"), "log(2, x)");
    }

    #[test]
    fn idempotent() {
        for source in ["x * (y + 2) * 3 + x", "Grad(0 + f, Vector(x, y))", "(a * b) ** 2 - 1"] {
            let once = canonicalize(source.parse::<Expr>().unwrap());
            assert!(is_canonical(&once), "{} is not canonical", once);
        }
    }
}
