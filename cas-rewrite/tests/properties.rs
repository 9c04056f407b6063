use cas_rewrite::{
    canonical::canonicalize,
    pattern::matches,
    rewrite::{rewrite_fully, rewrite_once},
    rules,
    Expr,
    Rule,
};
use proptest::prelude::*;

mod strategies;

/// Checks that another pass over a fixpoint of `rules` changes nothing.
fn assert_stable_fixpoint(e: Expr, rules: &[Rule]) -> Result<(), TestCaseError> {
    let result = rewrite_fully(&canonicalize(e), rules, 50).unwrap();
    if result.is_fixpoint() {
        let (next, changed) = rewrite_once(&result.expr, rules).unwrap();
        prop_assert!(!changed, "{} rewrote to {}", result.expr, next);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn canonicalize_is_idempotent(e in strategies::arb_expr()) {
        let once = canonicalize(e);
        let twice = canonicalize(once.clone());
        prop_assert!(once.structurally_eq(&twice), "{} became {}", once, twice);
    }

    #[test]
    fn sums_commute(a in strategies::arb_expr(), b in strategies::arb_expr()) {
        let ab = canonicalize(Expr::Add(vec![a.clone(), b.clone()]));
        let ba = canonicalize(Expr::Add(vec![b, a]));
        prop_assert!(ab.structurally_eq(&ba), "{} != {}", ab, ba);
    }

    #[test]
    fn products_commute(a in strategies::arb_expr(), b in strategies::arb_expr()) {
        let ab = canonicalize(Expr::Mul(vec![a.clone(), b.clone()]));
        let ba = canonicalize(Expr::Mul(vec![b, a]));
        prop_assert!(ab.structurally_eq(&ba), "{} != {}", ab, ba);
    }

    #[test]
    fn algebra_fixpoints_are_stable(e in strategies::arb_expr()) {
        assert_stable_fixpoint(e, rules::algebra())?;
    }

    #[test]
    fn fixpoints_are_stable(e in strategies::arb_expr()) {
        assert_stable_fixpoint(e, rules::all())?;
    }

    #[test]
    fn calculus_fixpoints_are_stable(e in strategies::arb_expr()) {
        let e = Expr::derivative(e, Expr::sym("x"));
        assert_stable_fixpoint(e, rules::all())?;
    }

    #[test]
    fn repeated_wildcards_bind_equal_subtrees(e in strategies::arb_expr()) {
        let pattern = Expr::call("f", vec![Expr::wild("a"), Expr::wild("a")]);
        let concrete = Expr::call("f", vec![e.clone(), canonicalize(e.clone())]);

        let bindings = matches(&pattern, &concrete);
        prop_assert!(bindings.is_some());

        let different = Expr::call("f", vec![e.clone(), Expr::call("g", vec![e])]);
        prop_assert!(matches(&pattern, &different).is_none());
    }
}
