//! Matching the operands of commutative operations in any order.
//!
//! Pattern operands are assigned to distinct concrete operands by a backtracking search. Operands
//! that have structure of their own are placed first, then constrained wildcards, then plain
//! wildcards, so that the cheapest and most selective operands prune the search early.
//!
//! If the pattern has at least two operands and one of them is an unconstrained wildcard whose
//! name occurs nowhere else among the pattern operands, the last such wildcard is the
//! **remainder**: instead of a single operand, it binds to every concrete operand the other
//! pattern operands did not claim, combined with the same operation (and canonicalized). If
//! nothing is left over, it binds to the identity of the operation, `0` for sums and `1` for
//! products. Without a remainder, every concrete operand must be claimed.
//!
//! A repeated wildcard is never the remainder, so in `?a ** ?b * ?a` both occurrences of `?a`
//! stand for a single operand, and the pattern only matches products of exactly two factors.
//! Add a separate remainder (`?a ** ?b * ?a * ?rest`) to match longer products.

use crate::canonical::normalize_node;
use crate::expr::{Expr, ExprKind, WildConstraint};
use super::{match_node, Bindings, Cont};

/// Returns true for a wildcard without a constraint.
fn is_plain_wild(expr: &Expr) -> bool {
    expr.as_wild().is_some_and(|wild| wild.constraint == WildConstraint::Any)
}

/// Returns true if the wildcard's name occurs exactly once among the pattern operands.
fn occurs_once(wild: &Expr, patterns: &[Expr]) -> bool {
    let Some(wild) = wild.as_wild() else {
        return false;
    };
    patterns
        .iter()
        .flat_map(Expr::post_order_iter)
        .filter(|expr| expr.as_wild().is_some_and(|other| other.name == wild.name))
        .count() == 1
}

/// The order in which pattern operands are assigned.
fn rank(expr: &Expr) -> u8 {
    match expr.as_wild() {
        None => 0,
        Some(wild) if wild.constraint != WildConstraint::Any => 1,
        Some(_) => 2,
    }
}

/// Combines the unclaimed operands into the operation of the given kind.
fn combine(kind: ExprKind, operands: Vec<Expr>) -> Expr {
    match kind {
        ExprKind::Mul => normalize_node(Expr::Mul(operands)),
        _ => normalize_node(Expr::Add(operands)),
    }
}

/// Matches the operands of an [`Expr::Add`] or [`Expr::Mul`] pattern against the operands of a
/// concrete node of the same kind.
pub(super) fn match_operands(
    kind: ExprKind,
    patterns: &[Expr],
    concretes: &[Expr],
    bindings: Bindings,
    k: &mut Cont<'_>,
) -> Option<Bindings> {
    let mut ordered = patterns.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|pattern| rank(pattern));

    let position = ordered.iter().rposition(|p| is_plain_wild(p) && occurs_once(p, patterns));
    let remainder = position
        .filter(|_| patterns.len() >= 2)
        .map(|i| ordered.remove(i));

    if ordered.len() > concretes.len()
        || (remainder.is_none() && ordered.len() != concretes.len())
    {
        return None;
    }

    let mut search = Search { kind, concretes, remainder, claimed: vec![false; concretes.len()] };
    search.assign(&ordered, bindings, k)
}

/// The state of the backtracking search over operand assignments.
struct Search<'a> {
    kind: ExprKind,
    concretes: &'a [Expr],
    remainder: Option<&'a Expr>,

    /// Which concrete operands have been claimed by a pattern operand.
    claimed: Vec<bool>,
}

impl Search<'_> {
    fn assign(
        &mut self,
        patterns: &[&Expr],
        bindings: Bindings,
        k: &mut Cont<'_>,
    ) -> Option<Bindings> {
        let Some((pattern, patterns)) = patterns.split_first() else {
            return self.finish(bindings, k);
        };

        let concretes = self.concretes;
        for (i, concrete) in concretes.iter().enumerate() {
            if self.claimed[i] {
                continue;
            }

            self.claimed[i] = true;
            let result = match_node(pattern, concrete, bindings.clone(), &mut |bindings| {
                self.assign(patterns, bindings, &mut *k)
            });
            self.claimed[i] = false;

            if result.is_some() {
                return result;
            }
        }

        None
    }

    /// Called once every non-remainder pattern operand has been assigned.
    fn finish(&mut self, bindings: Bindings, k: &mut Cont<'_>) -> Option<Bindings> {
        let leftovers = self.concretes
            .iter()
            .zip(&self.claimed)
            .filter(|(_, claimed)| !**claimed)
            .map(|(concrete, _)| concrete.clone())
            .collect::<Vec<_>>();

        match self.remainder {
            Some(remainder) => {
                let combined = combine(self.kind, leftovers);
                match_node(remainder, &combined, bindings, k)
            },
            None if leftovers.is_empty() => k(bindings),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::canonical::canonicalize;
    use super::super::matches;
    use super::*;

    fn parse(s: &str) -> Expr {
        canonicalize(s.parse().unwrap())
    }

    #[test]
    fn any_operand_order() {
        let pattern = "sin(?a) + cos(?a)".parse::<Expr>().unwrap();
        let bindings = matches(&pattern, &parse("cos(y) + sin(y)")).unwrap();

        assert_eq!(bindings.get("a"), Some(&Expr::sym("y")));
        assert!(matches(&pattern, &parse("cos(y) + sin(x)")).is_none());
    }

    #[test]
    fn exact_operand_count_without_remainder() {
        let pattern = "sin(?a) + cos(?b)".parse::<Expr>().unwrap();

        assert!(matches(&pattern, &parse("sin(x) + cos(y) + z")).is_none());
    }

    #[test]
    fn remainder_collects_leftovers() {
        let pattern = "?a + ?a + ?rest".parse::<Expr>().unwrap();
        let bindings = matches(&pattern, &parse("x + y + x + 3")).unwrap();

        assert_eq!(bindings.get("a"), Some(&Expr::sym("x")));
        assert_eq!(bindings.get("rest"), Some(&parse("y + 3")));
    }

    #[test]
    fn empty_remainder_is_identity() {
        let sum = matches(&"?a + ?a + ?rest".parse().unwrap(), &parse("x + x")).unwrap();
        assert!(sum.get("rest").unwrap().is_zero());

        let product = matches(&"?a ** ?b * ?rest".parse().unwrap(), &parse("x ** 2 * y")).unwrap();
        assert_eq!(product.get("rest"), Some(&Expr::sym("y")));
    }

    #[test]
    fn repeated_wildcard_across_operands() {
        let pattern = "?a ** ?b * ?a".parse::<Expr>().unwrap();

        assert!(matches(&pattern, &parse("x * x ** 3")).is_some());
        assert!(matches(&pattern, &parse("y * x ** 3")).is_none());

        // no operand is free to take `y`
        assert!(matches(&pattern, &parse("x * y * x ** 3")).is_none());
    }

    #[test]
    fn repeated_wildcard_is_never_the_remainder() {
        let pattern = "?a * ?a".parse::<Expr>().unwrap();
        assert!(matches(&pattern, &parse("x * x")).is_some());
        assert!(matches(&pattern, &parse("(x * y) * (x * y)")).is_none());

        let pattern = "?a ** ?b * ?a * ?rest".parse::<Expr>().unwrap();
        let bindings = matches(&pattern, &parse("x * y * x ** 3")).unwrap();
        assert_eq!(bindings.get("a"), Some(&Expr::sym("x")));
        assert_eq!(bindings.get("b"), Some(&Expr::num(3)));
        assert_eq!(bindings.get("rest"), Some(&Expr::sym("y")));
    }
}
