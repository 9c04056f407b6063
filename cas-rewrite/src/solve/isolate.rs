//! The isolation tactic: peeling the outermost operation off the side of an equation that
//! contains the target variable.
//!
//! Every case moves the inverse of one operation to the other side. Cases that would divide by
//! zero, take a zeroth root, or take a logarithm to base `0` or `1` do not apply.

use crate::expr::Expr;

/// Functions of one argument and their inverses.
const INVERSES: [(&str, &str); 8] = [
    ("sin", "asin"),
    ("asin", "sin"),
    ("cos", "acos"),
    ("acos", "cos"),
    ("tan", "atan"),
    ("atan", "tan"),
    ("exp", "log"),
    ("log", "exp"),
];

/// Returns the inverse of the named function of one argument.
fn inverse_of(name: &str) -> Option<&'static str> {
    INVERSES.iter().find(|(f, _)| *f == name).map(|&(_, inverse)| inverse)
}

/// Returns true if the expression cannot be the base of a logarithm.
fn is_invalid_log_base(base: &Expr) -> bool {
    base.is_zero() || base.is_one()
}

/// Returns true if the expression is a negative numeric literal.
fn is_negative_number(expr: &Expr) -> bool {
    expr.as_number().is_some_and(|n| *n < 0)
}

/// Returns true if the tree divides by zero somewhere, as `0 ** -n` or `a / 0`.
///
/// The canonicalizer leaves both forms in place, since neither has a value.
pub(super) fn divides_by_zero(expr: &Expr) -> bool {
    expr.post_order_iter().any(|node| match node {
        Expr::Exp(base, exp) => base.is_zero() && is_negative_number(exp),
        Expr::Div(_, rhs) => rhs.is_zero(),
        _ => false,
    })
}

/// Splits the operands of a sum or product into the single operand containing the target and
/// the rest. Returns [`None`] if zero or more than one operand contains the target.
fn split_operands<'a>(operands: &'a [Expr], target: &str) -> Option<(&'a Expr, Vec<Expr>)> {
    let (with, without): (Vec<&Expr>, Vec<&Expr>) = operands
        .iter()
        .partition(|op| op.contains_symbol(target));

    match with.as_slice() {
        [with] => Some((*with, without.into_iter().cloned().collect())),
        _ => None,
    }
}

/// Performs one isolation step on `side = other`, where only `side` contains the target.
///
/// Returns the new `(side, other)` pair, neither of which is canonicalized, or [`None`] if no case
/// applies.
pub(super) fn isolate(side: &Expr, other: &Expr, target: &str) -> Option<(Expr, Expr)> {
    let contains = |expr: &Expr| expr.contains_symbol(target);
    let other = other.clone();

    match side {
        // a + rest = o  =>  a = o - rest
        Expr::Add(terms) => {
            let (term, rest) = split_operands(terms, target)?;
            Some((term.clone(), other - Expr::Add(rest).downgrade()))
        },

        // a * rest = o  =>  a = o * rest^-1
        Expr::Mul(factors) => {
            let (factor, rest) = split_operands(factors, target)?;
            let rest = Expr::Mul(rest).downgrade();
            if rest.is_zero() || divides_by_zero(&rest) {
                return None;
            }
            Some((factor.clone(), other * Expr::pow(rest, Expr::num(-1))))
        },

        Expr::Exp(base, exp) => {
            let (base, exp) = (&**base, &**exp);
            match (contains(base), contains(exp)) {
                // a^e = o  =>  a = o^(1/e)
                (true, false) => {
                    if exp.is_zero() || (other.is_zero() && is_negative_number(exp)) {
                        return None;
                    }
                    Some((base.clone(), Expr::pow(other, Expr::num(1) / exp.clone())))
                },

                // b^a = o  =>  a = log_b(o)
                (false, true) => {
                    if is_invalid_log_base(base) {
                        return None;
                    }
                    Some((exp.clone(), Expr::call("log", vec![other, base.clone()])))
                },
                _ => None,
            }
        },

        Expr::Call(name, args) => match args.as_slice() {
            // f(a) = o  =>  a = f^-1(o)
            [arg] => {
                let inverse = inverse_of(name)?;
                Some((arg.clone(), Expr::call(inverse, vec![other])))
            },

            [value, base] if name == "log" => match (contains(value), contains(base)) {
                // log_b(a) = o  =>  a = b^o
                (true, false) => {
                    if is_invalid_log_base(base) {
                        return None;
                    }
                    Some((value.clone(), Expr::pow(base.clone(), other)))
                },

                // log_a(v) = o  =>  a = v^(1/o)
                (false, true) => {
                    if other.is_zero() {
                        return None;
                    }
                    Some((base.clone(), Expr::pow(value.clone(), Expr::num(1) / other)))
                },
                _ => None,
            },
            _ => None,
        },

        Expr::Sub(lhs, rhs) => {
            let (lhs, rhs) = (&**lhs, &**rhs);
            match (contains(lhs), contains(rhs)) {
                // a - b = o  =>  a = o + b
                (true, false) => Some((lhs.clone(), other + rhs.clone())),

                // b - a = o  =>  a = b - o
                (false, true) => Some((rhs.clone(), lhs.clone() - other)),
                _ => None,
            }
        },

        Expr::Div(lhs, rhs) => {
            let (lhs, rhs) = (&**lhs, &**rhs);
            match (contains(lhs), contains(rhs)) {
                // a / b = o  =>  a = o * b
                (true, false) => Some((lhs.clone(), other * rhs.clone())),

                // b / a = o  =>  a = b / o
                (false, true) => {
                    if other.is_zero() {
                        return None;
                    }
                    Some((rhs.clone(), lhs.clone() / other))
                },
                _ => None,
            }
        },

        _ => None,
    }
}
