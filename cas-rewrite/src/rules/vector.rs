//! Rules that expand the vector calculus operators into partial derivatives.

use crate::expr::Expr;
use crate::pattern::Bindings;
use crate::rule::Rule;
use super::{is_symbol, scalar, wild};

/// Wildcards for the variable vectors, by number of components.
const VARS: [&str; 3] = ["x", "y", "z"];

/// Wildcards for the components of a vector field.
const COMPONENTS: [&str; 3] = ["p", "q", "r"];

fn d(u: &str, v: &str) -> Expr {
    Expr::derivative(wild(u), wild(v))
}

fn vars(n: usize) -> Expr {
    Expr::vector(VARS[..n].iter().map(|v| wild(v)).collect())
}

/// Every variable wildcard used by a rule over `n` variables is bound to a symbol.
fn are_symbols(n: usize) -> impl Fn(&Bindings) -> bool + Send + Sync {
    move |b: &Bindings| VARS[..n].iter().all(|v| is_symbol(b, v))
}

fn grad(n: usize) -> Rule {
    Rule::new(
        format!("grad_{}d", n),
        Expr::grad(scalar("f"), vars(n)),
        Expr::vector(VARS[..n].iter().map(|v| Expr::derivative(scalar("f"), wild(v))).collect()),
    ).with_condition(are_symbols(n))
}

fn divergence(n: usize) -> Rule {
    let field = Expr::vector(COMPONENTS[..n].iter().map(|c| wild(c)).collect());
    let sum = COMPONENTS[..n]
        .iter()
        .zip(VARS)
        .map(|(c, v)| d(c, v))
        .reduce(|sum, term| sum + term)
        .unwrap_or_else(|| Expr::num(0));

    Rule::new(format!("div_{}d", n), Expr::divergence(field, vars(n)), sum)
        .with_condition(are_symbols(n))
}

fn curl() -> Rule {
    // curl(p, q, r) = (r_y - q_z, p_z - r_x, q_x - p_y)
    Rule::new(
        "curl_3d",
        Expr::curl(Expr::vector(vec![wild("p"), wild("q"), wild("r")]), vars(3)),
        Expr::vector(vec![
            d("r", "y") - d("q", "z"),
            d("p", "z") - d("r", "x"),
            d("q", "x") - d("p", "y"),
        ]),
    ).with_condition(are_symbols(3))
}

pub fn rules() -> Vec<Rule> {
    vec![grad(1), grad(2), grad(3), divergence(2), divergence(3), curl()]
}
