//! Distribution of a numeric factor over a sum.

use crate::rule::Rule;
use super::{constant, wild};

pub fn rules() -> Vec<Rule> {
    vec![
        // c(a + b) = ca + cb
        Rule::new(
            "distribute",
            constant("c") * (wild("a") + wild("b")),
            constant("c") * wild("a") + constant("c") * wild("b"),
        ),
    ]
}
