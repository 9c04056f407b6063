//! Rules for products: division and combining like factors.
//!
//! Like factors are only combined when they are scalars; products of vectors and matrices do not
//! commute in general, so `v * v` is left alone.

use crate::expr::Expr;
use crate::rule::Rule;
use super::{num, scalar, wild};

pub fn rules() -> Vec<Rule> {
    vec![
        // a / b = a * b^-1
        Rule::new(
            "divide",
            wild("a") / wild("b"),
            wild("a") * Expr::pow(wild("b"), num(-1)),
        ),

        // a * a = a^2
        Rule::new(
            "multiply_same_factor",
            scalar("a") * scalar("a") * wild("rest"),
            Expr::pow(scalar("a"), num(2)) * wild("rest"),
        ),

        // a^b * a = a^(b+1)
        Rule::new(
            "multiply_power_by_base",
            Expr::pow(scalar("a"), wild("b")) * scalar("a") * wild("rest"),
            Expr::pow(scalar("a"), wild("b") + num(1)) * wild("rest"),
        ),

        // a^b * a^c = a^(b+c)
        Rule::new(
            "multiply_powers",
            Expr::pow(scalar("a"), wild("b")) * Expr::pow(scalar("a"), wild("c")) * wild("rest"),
            Expr::pow(scalar("a"), wild("b") + wild("c")) * wild("rest"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::canonical::canonicalize;
    use crate::expr::Shape;
    use crate::rewrite::rewrite_fully;
    use super::*;

    fn simplify(expr: Expr) -> String {
        rewrite_fully(&canonicalize(expr), &rules(), 100).unwrap().expr.to_string()
    }

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    #[test]
    fn like_factors() {
        assert_eq!(simplify(parse("x * x")), "x ** 2");
        assert_eq!(simplify(parse("x ** 2 * y * x")), "y * x ** 3");
        assert_eq!(simplify(parse("x ** a * x ** b")), "x ** (a + b)");
        assert_eq!(simplify(parse("2 * x * x * x")), "2 * x ** 3");
    }

    #[test]
    fn division() {
        assert_eq!(simplify(parse("x / y")), "x / y");
        assert_eq!(simplify(parse("x / x")), "1");
        assert_eq!(simplify(parse("6 * x / 3")), "2 * x");
    }

    #[test]
    fn vectors_do_not_combine() {
        let v = Expr::sym_with_shape("v", Shape::Vector(3));
        let expr = v.clone() * v;

        assert_eq!(simplify(expr), "v * v");
    }
}
