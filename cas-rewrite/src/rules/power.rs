//! Rules for powers of powers and powers of products.

use crate::expr::Expr;
use crate::rule::Rule;
use super::{constant, is_integer, wild};

pub fn rules() -> Vec<Rule> {
    vec![
        // (a^b)^n = a^(bn)
        Rule::new(
            "power_of_power",
            Expr::pow(Expr::pow(wild("a"), wild("b")), constant("n")),
            Expr::pow(wild("a"), wild("b") * constant("n")),
        ).with_condition(|b| is_integer(b, "n")),

        // (ab)^n = a^n * b^n
        Rule::new(
            "power_of_product",
            Expr::pow(wild("a") * wild("b"), constant("n")),
            Expr::pow(wild("a"), constant("n")) * Expr::pow(wild("b"), constant("n")),
        ).with_condition(|b| is_integer(b, "n")),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::canonical::canonicalize;
    use crate::rewrite::rewrite_fully;
    use super::*;

    fn simplify(s: &str) -> String {
        let expr = canonicalize(s.parse::<Expr>().unwrap());
        rewrite_fully(&expr, &rules(), 100).unwrap().expr.to_string()
    }

    #[test]
    fn integer_exponents() {
        assert_eq!(simplify("(x ** 2) ** 3"), "x ** 6");
        assert_eq!(simplify("(2 * x * y) ** 2"), "4 * x ** 2 * y ** 2");
    }

    #[test]
    fn fractional_exponents_are_kept() {
        assert_eq!(simplify("(x ** 2) ** 0.5"), "(x ** 2) ** 0.5");
    }
}
