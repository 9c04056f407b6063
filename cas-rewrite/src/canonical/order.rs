use crate::expr::{Expr, Primary};
use std::cmp::Ordering;

/// The total order used to sort the operands of commutative operations.
///
/// Expressions are compared first by [`ExprKind`](crate::expr::ExprKind) (numbers, then symbols,
/// then wildcards, then operations), then by their payload (numeric value, name), and finally by
/// their children, lexicographically. Two expressions compare [`Ordering::Equal`] exactly when
/// they are [structurally equal](Expr::structurally_eq).
pub fn order(lhs: &Expr, rhs: &Expr) -> Ordering {
    lhs.kind()
        .cmp(&rhs.kind())
        .then_with(|| payload(lhs, rhs))
        .then_with(|| children(lhs, rhs))
}

/// Compares the data stored directly in two nodes of the same kind.
fn payload(lhs: &Expr, rhs: &Expr) -> Ordering {
    match (lhs, rhs) {
        (Expr::Primary(Primary::Number(l)), Expr::Primary(Primary::Number(r))) => l.cmp(r),
        (Expr::Primary(Primary::Symbol(l)), Expr::Primary(Primary::Symbol(r))) => {
            l.name.cmp(&r.name).then(l.shape.cmp(&r.shape))
        },
        (Expr::Primary(Primary::Wild(l)), Expr::Primary(Primary::Wild(r))) => {
            l.name.cmp(&r.name).then(l.constraint.cmp(&r.constraint))
        },
        (Expr::Call(l, _), Expr::Call(r, _)) => l.cmp(r),
        _ => Ordering::Equal,
    }
}

fn children(lhs: &Expr, rhs: &Expr) -> Ordering {
    let (lhs, rhs) = (lhs.children(), rhs.children());
    lhs.iter()
        .zip(&rhs)
        .map(|(l, r)| order(l, r))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn atoms_before_operations() {
        let x = Expr::sym("x");
        let sum = Expr::sym("a") + Expr::sym("b");

        assert_eq!(order(&Expr::num(100), &x), Ordering::Less);
        assert_eq!(order(&x, &sum), Ordering::Less);
        assert_eq!(order(&sum, &Expr::num(1)), Ordering::Greater);
    }

    #[test]
    fn names_sort_lexicographically() {
        assert_eq!(order(&Expr::sym("a"), &Expr::sym("b")), Ordering::Less);
        assert_eq!(order(&Expr::call("cos", vec![]), &Expr::call("sin", vec![])), Ordering::Less);
    }

    #[test]
    fn equal_only_when_structurally_equal() {
        let lhs = Expr::pow(Expr::sym("x"), Expr::num(2));
        let rhs = Expr::pow(Expr::sym("x"), Expr::num(3));

        assert_eq!(order(&lhs, &lhs.clone()), Ordering::Equal);
        assert_eq!(order(&lhs, &rhs), Ordering::Less);
    }
}
