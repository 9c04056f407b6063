//! Rules for elementary functions: special values, and compositions with inverse functions.
//!
//! `log(a)` is the natural logarithm, and `log(a, b)` is the logarithm of `a` to base `b`.

use crate::expr::Expr;
use crate::rule::Rule;
use super::{call, is_log_base, num, wild};

/// Pairs of functions `(f, g)` such that `f(g(a)) = a` for every `a` in the domain of `g`.
const INVERSE_COMPOSITIONS: [(&str, &str); 5] = [
    ("sin", "asin"),
    ("cos", "acos"),
    ("tan", "atan"),
    ("exp", "log"),
    ("log", "exp"),
];

/// Values of single-argument functions at `0` and `1`.
const SPECIAL_VALUES: [(&str, i32, i32); 5] = [
    ("sin", 0, 0),
    ("cos", 0, 1),
    ("tan", 0, 0),
    ("exp", 0, 1),
    ("log", 1, 0),
];

pub fn rules() -> Vec<Rule> {
    let mut rules = SPECIAL_VALUES
        .iter()
        .map(|&(name, arg, value)| {
            Rule::new(format!("{}({})", name, arg), call(name, num(arg)), num(value))
        })
        .collect::<Vec<_>>();

    rules.extend([
        // log_a(a) = 1
        Rule::new(
            "log_of_base",
            Expr::call("log", vec![wild("a"), wild("a")]),
            num(1),
        ).with_condition(|b| is_log_base(b, "a")),

        // log_b(1) = 0
        Rule::new(
            "log_of_one",
            Expr::call("log", vec![num(1), wild("b")]),
            num(0),
        ).with_condition(|b| is_log_base(b, "b")),

        // b^(log_b(a)) = a
        Rule::new(
            "power_of_log",
            Expr::pow(wild("b"), Expr::call("log", vec![wild("a"), wild("b")])),
            wild("a"),
        ).with_condition(|b| is_log_base(b, "b")),

        // log_b(b^a) = a
        Rule::new(
            "log_of_power",
            Expr::call("log", vec![Expr::pow(wild("b"), wild("a")), wild("b")]),
            wild("a"),
        ).with_condition(|b| is_log_base(b, "b")),
    ]);

    rules.extend(INVERSE_COMPOSITIONS.iter().map(|&(outer, inner)| {
        Rule::new(
            format!("{}_{}", outer, inner),
            call(outer, call(inner, wild("a"))),
            wild("a"),
        )
    }));

    rules
}
