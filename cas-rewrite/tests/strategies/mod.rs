use cas_rewrite::Expr;
use proptest::prelude::*;

/// Small scalar expressions over `x`, `y` and `z`, in no particular form.
pub fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (-10i32..10).prop_map(Expr::num),
        prop::sample::select(vec!["x", "y", "z"]).prop_map(Expr::sym),
    ];

    leaf.prop_recursive(
        4,  // levels deep
        64, // max size
        10, // items per collection
        |inner| prop_oneof![
            prop::collection::vec(inner.clone(), 2..5).prop_map(Expr::Add),
            prop::collection::vec(inner.clone(), 2..5).prop_map(Expr::Mul),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l - r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l / r),
            (inner.clone(), -3i32..4).prop_map(|(base, exp)| Expr::pow(base, Expr::num(exp))),
            inner.clone().prop_map(|e| Expr::call("sin", vec![e])),
            inner.clone().prop_map(|e| Expr::call("log", vec![e])),
        ]
    )
}
