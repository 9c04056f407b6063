//! Matching rule patterns containing wildcards against concrete expressions.
//!
//! Matching is structural, with two exceptions:
//!
//! - A [`Wild`](crate::expr::Wild) matches any subexpression that satisfies its constraint. A
//!   wildcard name that occurs more than once in a pattern must bind to canonically equal
//!   subexpressions every time.
//! - The operands of [`Expr::Add`] and [`Expr::Mul`] patterns may match the concrete operands in
//!   any order. See [`commutative`] for how the assignment is searched, and for the "remainder"
//!   wildcard that stands for every operand not claimed by another pattern operand.
//!
//! The matcher returns the first consistent assignment it finds. Any condition passed to
//! [`matches_with`] is checked against each candidate before it is accepted, so a rejected
//! candidate makes the matcher backtrack and try the next one.
//!
//! Failing to match is not an error; it is reported as [`None`].

mod commutative;
mod substitute;

use crate::expr::{Expr, Primary, Wild, WildConstraint};
use std::collections::HashMap;

pub use substitute::substitute;

/// The continuation called with the bindings of a successful partial match. Returning [`None`]
/// rejects those bindings and makes the matcher backtrack.
type Cont<'a> = dyn FnMut(Bindings) -> Option<Bindings> + 'a;

/// The subexpressions bound to each wildcard name by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(HashMap<String, Expr>);

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subexpression bound to the wildcard with the given name (without the `?`).
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.0.get(name)
    }

    /// Returns true if the wildcard with the given name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of bound wildcards.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the bound names and subexpressions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.0.iter().map(|(name, expr)| (name.as_str(), expr))
    }

    /// Binds a subexpression to a name, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, expr: Expr) {
        self.0.insert(name.into(), expr);
    }
}

impl FromIterator<(String, Expr)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Expr)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Matches the pattern against the concrete expression, returning the bindings on success.
pub fn matches(pattern: &Expr, concrete: &Expr) -> Option<Bindings> {
    matches_with(pattern, concrete, Bindings::new(), &|_| true)
}

/// Matches the pattern against the concrete expression, extending the given bindings, and only
/// accepting a complete match for which `condition` returns true.
pub fn matches_with(
    pattern: &Expr,
    concrete: &Expr,
    bindings: Bindings,
    condition: &dyn Fn(&Bindings) -> bool,
) -> Option<Bindings> {
    match_node(pattern, concrete, bindings, &mut |bindings| {
        condition(&bindings).then_some(bindings)
    })
}

/// Returns true if the expression satisfies the wildcard's constraint.
fn satisfies(wild: &Wild, concrete: &Expr) -> bool {
    match wild.constraint {
        WildConstraint::Any => true,
        WildConstraint::Constant => concrete.is_number(),
        WildConstraint::Scalar => concrete.shape().is_scalar(),
    }
}

/// Matches one pattern node, passing the extended bindings to `k` on success.
fn match_node(
    pattern: &Expr,
    concrete: &Expr,
    mut bindings: Bindings,
    k: &mut Cont<'_>,
) -> Option<Bindings> {
    match pattern {
        Expr::Primary(Primary::Wild(wild)) => {
            if !satisfies(wild, concrete) {
                return None;
            }
            match bindings.get(&wild.name) {
                Some(bound) if bound != concrete => None,
                Some(_) => k(bindings),
                None => {
                    bindings.insert(wild.name.clone(), concrete.clone());
                    k(bindings)
                },
            }
        },
        Expr::Primary(_) => {
            if pattern == concrete {
                k(bindings)
            } else {
                None
            }
        },
        Expr::Add(patterns) | Expr::Mul(patterns) => {
            let concretes = match (pattern, concrete) {
                (Expr::Add(_), Expr::Add(concretes)) | (Expr::Mul(_), Expr::Mul(concretes)) => concretes,
                _ => return None,
            };
            commutative::match_operands(pattern.kind(), patterns, concretes, bindings, k)
        },
        _ => {
            if pattern.kind() != concrete.kind() {
                return None;
            }
            if let (Expr::Call(p, _), Expr::Call(c, _)) = (pattern, concrete) {
                if p != c {
                    return None;
                }
            }
            match_sequence(&pattern.children(), &concrete.children(), bindings, k)
        },
    }
}

/// Matches pattern operands against concrete operands pairwise, in order.
fn match_sequence(
    patterns: &[&Expr],
    concretes: &[&Expr],
    bindings: Bindings,
    k: &mut Cont<'_>,
) -> Option<Bindings> {
    match (patterns.split_first(), concretes.split_first()) {
        (None, None) => k(bindings),
        (Some((pattern, patterns)), Some((concrete, concretes))) => {
            match_node(pattern, concrete, bindings, &mut |bindings| {
                match_sequence(patterns, concretes, bindings, &mut *k)
            })
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(s: &str) -> Expr {
        crate::canonical::canonicalize(s.parse().unwrap())
    }

    #[test]
    fn binds_wildcards() {
        let bindings = matches(&"sin(?a) ** 2".parse().unwrap(), &parse("sin(x + 1) ** 2")).unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("a"), Some(&parse("x + 1")));
    }

    #[test]
    fn repeated_wildcards_must_agree() {
        let pattern = "log(?a, ?a)".parse::<Expr>().unwrap();

        assert!(matches(&pattern, &parse("log(x + 2, 2 + x)")).is_some());
        assert!(matches(&pattern, &parse("log(x, y)")).is_none());
    }

    #[test]
    fn structure_must_agree() {
        let pattern = "Derivative(?u, ?v)".parse::<Expr>().unwrap();

        assert!(matches(&pattern, &parse("Integral(x, x)")).is_none());
        assert!(matches(&"sin(?a)".parse().unwrap(), &parse("cos(x)")).is_none());
        assert!(matches(&"f(?a)".parse().unwrap(), &parse("f(x, y)")).is_none());
    }

    #[test]
    fn constraints() {
        let pattern = Expr::wild_with("c", WildConstraint::Constant) * Expr::wild("a");

        assert!(matches(&pattern, &parse("3 * x")).is_some());
        assert!(matches(&pattern, &parse("y * x")).is_none());

        let scalar = Expr::wild_with("a", WildConstraint::Scalar);
        let vector = Expr::sym_with_shape("v", crate::expr::Shape::Vector(3));
        assert!(matches(&scalar, &vector).is_none());
        assert!(matches(&scalar, &parse("x")).is_some());
    }

    #[test]
    fn condition_causes_backtracking() {
        // the first assignment tried binds `?a` to `x`; the condition rejects it
        let pattern = Expr::wild("a") * Expr::wild("b");
        let concrete = parse("x * y");
        let bindings = matches_with(&pattern, &concrete, Bindings::new(), &|b| {
            b.get("a").is_some_and(|a| a.structurally_eq(&Expr::sym("y")))
        })
        .unwrap();

        assert_eq!(bindings.get("b"), Some(&Expr::sym("x")));
    }

    #[test]
    fn extends_existing_bindings() {
        let bound = [("a".to_string(), Expr::sym("x"))].into_iter().collect::<Bindings>();

        assert!(matches_with(&Expr::wild("a"), &Expr::sym("y"), bound.clone(), &|_| true).is_none());
        assert!(matches_with(&Expr::wild("a"), &Expr::sym("x"), bound, &|_| true).is_some());
    }
}
