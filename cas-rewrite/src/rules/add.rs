//! Rules for sums: subtraction and combining like terms.

use crate::expr::Expr;
use crate::rule::Rule;
use super::{constant, num, wild};

pub fn rules() -> Vec<Rule> {
    vec![
        // a - b = a + (-1)b
        Rule::new(
            "subtract",
            wild("a") - wild("b"),
            wild("a") + num(-1) * wild("b"),
        ),

        // a + a = 2a
        Rule::new(
            "add_same_term",
            wild("a") + wild("a") + wild("rest"),
            num(2) * wild("a") + wild("rest"),
        ),

        // ca + a = (c+1)a
        Rule::new(
            "add_term_to_multiple",
            constant("c") * wild("a") + wild("a") + wild("rest"),
            (constant("c") + num(1)) * wild("a") + wild("rest"),
        ),

        // ca + da = (c+d)a
        Rule::new(
            "add_multiples",
            constant("c") * wild("a") + constant("d") * wild("a") + wild("rest"),
            (constant("c") + constant("d")) * wild("a") + wild("rest"),
        ),
    ]
}
