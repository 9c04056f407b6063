//! Rules for derivatives and antiderivatives.
//!
//! `Derivative(u, v)` and `Integral(u, v)` are only rewritten when `v` is a symbol. Antiderivatives
//! are given without a constant of integration.

use crate::expr::Expr;
use crate::pattern::Bindings;
use crate::rule::Rule;
use super::{call, constant, free_of, is_symbol, num, wild};

fn d(u: Expr) -> Expr {
    Expr::derivative(u, wild("v"))
}

fn int(u: Expr) -> Expr {
    Expr::integral(u, wild("v"))
}

/// `v` is a symbol, and `expr` does not depend on it.
fn constant_in(b: &Bindings, expr: &str) -> bool {
    is_symbol(b, "v") && free_of(b, expr, "v")
}

/// Chain rules for single-argument functions: `(name, f'(u))`.
fn chain_rules() -> [(&'static str, Expr); 5] {
    [
        ("sin", call("cos", wild("u"))),
        ("cos", num(-1) * call("sin", wild("u"))),
        ("tan", Expr::pow(call("cos", wild("u")), num(-2))),
        ("exp", call("exp", wild("u"))),
        ("log", Expr::pow(wild("u"), num(-1))),
    ]
}

fn derivative_rules() -> Vec<Rule> {
    let mut rules = vec![
        Rule::new("derivative_of_constant", d(wild("u")), num(0))
            .with_condition(|b| constant_in(b, "u")),

        Rule::new("derivative_of_variable", d(wild("v")), num(1))
            .with_condition(|b| is_symbol(b, "v")),

        // (u + w)' = u' + w'
        Rule::new(
            "derivative_of_sum",
            d(wild("u") + wild("w")),
            d(wild("u")) + d(wild("w")),
        ).with_condition(|b| is_symbol(b, "v")),

        // (cu)' = cu'
        Rule::new(
            "derivative_of_multiple",
            d(wild("c") * wild("u")),
            wild("c") * d(wild("u")),
        ).with_condition(|b| constant_in(b, "c")),

        // (u^n)' = n u^(n-1) u'
        Rule::new(
            "derivative_of_power",
            d(Expr::pow(wild("u"), wild("n"))),
            wild("n") * Expr::pow(wild("u"), wild("n") - num(1)) * d(wild("u")),
        ).with_condition(|b| constant_in(b, "n")),

        // (b^u)' = b^u log(b) u'
        Rule::new(
            "derivative_of_exponential",
            d(Expr::pow(wild("b"), wild("u"))),
            Expr::pow(wild("b"), wild("u")) * call("log", wild("b")) * d(wild("u")),
        ).with_condition(|b| constant_in(b, "b")),

        // (fg)' = f'g + fg'
        Rule::new(
            "derivative_of_product",
            d(wild("f") * wild("g")),
            d(wild("f")) * wild("g") + wild("f") * d(wild("g")),
        ).with_condition(|b| is_symbol(b, "v")),
    ];

    rules.extend(chain_rules().into_iter().map(|(name, outer)| {
        Rule::new(
            format!("derivative_of_{}", name),
            d(call(name, wild("u"))),
            outer * d(wild("u")),
        ).with_condition(|b| is_symbol(b, "v"))
    }));

    rules
}

fn integral_rules() -> Vec<Rule> {
    vec![
        Rule::new("integral_of_constant", int(wild("u")), wild("u") * wild("v"))
            .with_condition(|b| constant_in(b, "u")),

        Rule::new(
            "integral_of_variable",
            int(wild("v")),
            Expr::num((1, 2)) * Expr::pow(wild("v"), num(2)),
        ).with_condition(|b| is_symbol(b, "v")),

        Rule::new("integral_of_reciprocal", int(Expr::pow(wild("v"), num(-1))), call("log", wild("v")))
            .with_condition(|b| is_symbol(b, "v")),

        // v^n = v^(n+1) / (n+1)
        Rule::new(
            "integral_of_power",
            int(Expr::pow(wild("v"), constant("n"))),
            Expr::pow(wild("v"), constant("n") + num(1)) * Expr::pow(constant("n") + num(1), num(-1)),
        ).with_condition(|b| is_symbol(b, "v") && b.get("n").is_some_and(|n| !n.structurally_eq(&num(-1)))),

        Rule::new(
            "integral_of_sum",
            int(wild("u") + wild("w")),
            int(wild("u")) + int(wild("w")),
        ).with_condition(|b| is_symbol(b, "v")),

        Rule::new(
            "integral_of_multiple",
            int(wild("c") * wild("u")),
            wild("c") * int(wild("u")),
        ).with_condition(|b| constant_in(b, "c")),

        Rule::new("integral_of_exp", int(call("exp", wild("v"))), call("exp", wild("v")))
            .with_condition(|b| is_symbol(b, "v")),

        Rule::new("integral_of_sin", int(call("sin", wild("v"))), num(-1) * call("cos", wild("v")))
            .with_condition(|b| is_symbol(b, "v")),

        Rule::new("integral_of_cos", int(call("cos", wild("v"))), call("sin", wild("v")))
            .with_condition(|b| is_symbol(b, "v")),
    ]
}

pub fn rules() -> Vec<Rule> {
    let mut rules = derivative_rules();
    rules.extend(integral_rules());
    rules
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::canonical::canonicalize;
    use crate::rewrite::rewrite_fully;
    use super::*;

    fn simplify(s: &str) -> String {
        let calculus = rules();
        let rules = [crate::rules::algebra(), calculus.as_slice()].concat();
        let expr = canonicalize(s.parse::<Expr>().unwrap());
        rewrite_fully(&expr, &rules, 100).unwrap().expr.to_string()
    }

    #[test]
    fn polynomials() {
        assert_eq!(simplify("Derivative(x ** 2, x)"), "2 * x");
        assert_eq!(simplify("Derivative(3 * x ** 2 + 5 * x + 7, x)"), "6 * x + 5");
        assert_eq!(simplify("Derivative(y, x)"), "0");
        assert_eq!(simplify("Derivative(x, x)"), "1");
    }

    #[test]
    fn chain_rule() {
        assert_eq!(simplify("Derivative(sin(2 * x), x)"), "2 * cos(2 * x)");
        assert_eq!(simplify("Derivative(exp(x ** 2), x)"), "2 * x * exp(x ** 2)");
    }

    #[test]
    fn product_rule() {
        assert_eq!(simplify("Derivative(x * sin(x), x)"), "sin(x) + x * cos(x)");
    }

    #[test]
    fn not_a_variable() {
        assert_eq!(simplify("Derivative(x, 2)"), "Derivative(x, 2)");
    }

    #[test]
    fn integrals() {
        assert_eq!(simplify("Integral(3, x)"), "3 * x");
        assert_eq!(simplify("Integral(x ** 2, x)"), "1/3 * x ** 3");
        assert_eq!(simplify("Integral(x ** -1, x)"), "log(x)");
        assert_eq!(simplify("Integral(2 * cos(x) + x, x)"), "0.5 * x ** 2 + 2 * sin(x)");
    }
}
