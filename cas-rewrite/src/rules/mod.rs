//! The default rule sets.
//!
//! Each submodule builds a list of [`Rule`]s for one area. The lists are built once, on first
//! use, and shared by every caller afterwards:
//!
//! - [`algebra`]: [`add`], [`multiply`], [`power`] and [`distribute`], in that order
//! - [`functions`]: values and inverses of elementary functions
//! - [`calculus`]: derivatives and antiderivatives
//! - [`vector`]: gradient, divergence and curl, expanded into derivatives
//!
//! [`all`] is the concatenation of the four, and is what the solver strategies use by default.

pub mod add;
pub mod calculus;
pub mod distribute;
pub mod function;
pub mod multiply;
pub mod power;
pub mod vector;

use crate::expr::{Expr, WildConstraint};
use crate::pattern::Bindings;
use crate::rule::Rule;
use once_cell::sync::Lazy;

static ALGEBRA: Lazy<Vec<Rule>> = Lazy::new(|| {
    [add::rules(), multiply::rules(), power::rules(), distribute::rules()].concat()
});

static FUNCTIONS: Lazy<Vec<Rule>> = Lazy::new(function::rules);

static CALCULUS: Lazy<Vec<Rule>> = Lazy::new(calculus::rules);

static VECTOR: Lazy<Vec<Rule>> = Lazy::new(vector::rules);

static ALL: Lazy<Vec<Rule>> = Lazy::new(|| {
    [algebra(), functions(), calculus(), vector()].concat()
});

/// Rules for sums, products and powers.
pub fn algebra() -> &'static [Rule] {
    &ALGEBRA
}

/// Rules for elementary functions.
pub fn functions() -> &'static [Rule] {
    &FUNCTIONS
}

/// Rules for `Derivative` and `Integral`.
pub fn calculus() -> &'static [Rule] {
    &CALCULUS
}

/// Rules for `Grad`, `Div` and `Curl`.
pub fn vector() -> &'static [Rule] {
    &VECTOR
}

/// Every default rule.
pub fn all() -> &'static [Rule] {
    &ALL
}

/// An unconstrained wildcard.
pub(crate) fn wild(name: &str) -> Expr {
    Expr::wild(name)
}

/// A wildcard that only matches numbers.
pub(crate) fn constant(name: &str) -> Expr {
    Expr::wild_with(name, WildConstraint::Constant)
}

/// A wildcard that only matches scalars.
pub(crate) fn scalar(name: &str) -> Expr {
    Expr::wild_with(name, WildConstraint::Scalar)
}

pub(crate) fn num(n: i32) -> Expr {
    Expr::num(n)
}

/// A call to a function of one argument.
pub(crate) fn call(name: &str, arg: Expr) -> Expr {
    Expr::call(name, vec![arg])
}

/// Returns true if the wildcard is bound to a symbol.
pub(crate) fn is_symbol(bindings: &Bindings, name: &str) -> bool {
    bindings.get(name).is_some_and(|expr| expr.as_symbol().is_some())
}

/// Returns true if the subexpression bound to `expr` does not contain the symbol bound to `var`.
pub(crate) fn free_of(bindings: &Bindings, expr: &str, var: &str) -> bool {
    match (bindings.get(expr), bindings.get(var).and_then(Expr::as_symbol)) {
        (Some(expr), Some(var)) => !expr.contains_symbol(&var.name),
        _ => false,
    }
}

/// Returns true if the wildcard is bound to an integer literal.
pub(crate) fn is_integer(bindings: &Bindings, name: &str) -> bool {
    bindings.get(name).is_some_and(Expr::is_integer)
}

/// Returns true if the wildcard is bound to something usable as the base of a logarithm: not the
/// literals `0` or `1`.
pub(crate) fn is_log_base(bindings: &Bindings, name: &str) -> bool {
    bindings.get(name).is_some_and(|base| !base.is_zero() && !base.is_one())
}
