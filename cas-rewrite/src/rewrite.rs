//! The rewrite engine: single passes over a tree, and the fixpoint driver built on them.
//!
//! A pass visits the tree in post-order, so that rules see subtrees that were already rewritten
//! earlier in the same pass. At each node the rules are tried in order, and the first one whose
//! replacement differs from the node wins. The pass then moves past that node: no other rule is
//! tried at the same position until the next pass. A parent whose children changed is
//! re-normalized (see [`normalize_node`]) before the rules are tried on it.

use crate::canonical::normalize_node;
use crate::error::Error;
use crate::expr::Expr;
use crate::rule::Rule;
use crate::step_collector::StepCollector;
use log::{debug, trace};

/// A single rule application made during a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The name of the rule that was applied.
    pub rule: String,

    /// The subexpression the rule matched.
    pub before: Expr,

    /// The canonicalized replacement.
    pub after: Expr,
}

/// Why [`rewrite_fully`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A pass made no changes.
    Fixpoint,

    /// The maximum number of passes was reached while passes were still making changes.
    IterationLimit,
}

/// The result of [`rewrite_fully`].
#[derive(Debug, Clone)]
pub struct RewriteResult {
    /// The final expression.
    pub expr: Expr,

    /// The number of passes that changed the expression.
    pub passes: usize,

    /// Why the rewrite stopped.
    pub outcome: RewriteOutcome,
}

impl RewriteResult {
    /// Returns true if the rewrite reached a fixpoint.
    pub fn is_fixpoint(&self) -> bool {
        self.outcome == RewriteOutcome::Fixpoint
    }
}

/// Runs one rewrite pass over the expression, returning the new expression and whether anything
/// changed.
pub fn rewrite_once(expr: &Expr, rules: &[Rule]) -> Result<(Expr, bool), Error> {
    rewrite_once_with_steps(expr, rules, &mut ())
}

/// Runs one rewrite pass over the expression, reporting every rule application to `steps`.
pub fn rewrite_once_with_steps(
    expr: &Expr,
    rules: &[Rule],
    steps: &mut dyn StepCollector<Step>,
) -> Result<(Expr, bool), Error> {
    let mut changed = false;
    let expr = rewrite_node(expr.clone(), rules, steps, &mut changed)?;
    Ok((expr, changed))
}

fn rewrite_node(
    expr: Expr,
    rules: &[Rule],
    steps: &mut dyn StepCollector<Step>,
    changed: &mut bool,
) -> Result<Expr, Error> {
    let mut children_changed = false;
    let expr = expr.try_map_children(|child| {
        rewrite_node(child, rules, &mut *steps, &mut children_changed)
    })?;

    let expr = if children_changed {
        *changed = true;
        normalize_node(expr)
    } else {
        expr
    };

    for rule in rules {
        let Some(after) = rule.apply(&expr)? else {
            continue;
        };
        if after.structurally_eq(&expr) {
            continue;
        }

        trace!("{}: {} => {}", rule.name(), expr, after);
        *changed = true;
        steps.push(Step { rule: rule.name().to_string(), before: expr, after: after.clone() });
        return Ok(after);
    }

    Ok(expr)
}

/// Runs rewrite passes until one makes no changes, or until `max_passes` passes have run.
pub fn rewrite_fully(expr: &Expr, rules: &[Rule], max_passes: usize) -> Result<RewriteResult, Error> {
    rewrite_fully_with_steps(expr, rules, max_passes, &mut ())
}

/// Like [`rewrite_fully`], reporting every rule application to `steps`.
pub fn rewrite_fully_with_steps(
    expr: &Expr,
    rules: &[Rule],
    max_passes: usize,
    steps: &mut dyn StepCollector<Step>,
) -> Result<RewriteResult, Error> {
    let mut expr = expr.clone();
    let mut passes = 0;

    while passes < max_passes {
        let (next, changed) = rewrite_once_with_steps(&expr, rules, steps)?;
        if !changed {
            debug!("fixpoint after {} pass(es): {}", passes, expr);
            return Ok(RewriteResult { expr, passes, outcome: RewriteOutcome::Fixpoint });
        }

        passes += 1;
        debug!("pass {}: {}", passes, next);
        expr = next;
    }

    debug!("stopped after {} passes without reaching a fixpoint", passes);
    Ok(RewriteResult { expr, passes, outcome: RewriteOutcome::IterationLimit })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::canonical::canonicalize;
    use super::*;

    fn parse(s: &str) -> Expr {
        canonicalize(s.parse().unwrap())
    }

    fn double() -> Rule {
        Rule::new(
            "double",
            Expr::wild("a") + Expr::wild("a") + Expr::wild("rest"),
            Expr::num(2) * Expr::wild("a") + Expr::wild("rest"),
        )
    }

    fn sin_zero() -> Rule {
        Rule::new("sin_zero", Expr::call("sin", vec![Expr::num(0)]), Expr::num(0))
    }

    #[test]
    fn children_before_parents() {
        let mut steps = Vec::new();
        let (expr, changed) = rewrite_once_with_steps(
            &parse("sin(0) + y + y"),
            &[double(), sin_zero()],
            &mut steps,
        ).unwrap();

        // `sin(0)` is rewritten first; the parent sum is re-normalized, then `double` applies to it
        assert!(changed);
        assert_eq!(expr.to_string(), "2 * y");
        assert_eq!(steps.iter().map(|s| s.rule.as_str()).collect::<Vec<_>>(), ["sin_zero", "double"]);
    }

    #[test]
    fn one_rule_per_node_per_pass() {
        let (expr, changed) = rewrite_once(&parse("x + x + x + x"), &[double()]).unwrap();
        assert!(changed);
        assert_eq!(expr.to_string(), "x + x + 2 * x");

        // x+x+x+x => x+x+2x => 2x+2x => 4x
        let result = rewrite_fully(&parse("x + x + x + x"), &[double()], 10).unwrap();
        assert!(result.is_fixpoint());
        assert_eq!(result.passes, 3);
        assert_eq!(result.expr.to_string(), "4 * x");
    }

    #[test]
    fn no_change_without_match() {
        let expr = parse("x + y");
        let (after, changed) = rewrite_once(&expr, &[double()]).unwrap();

        assert!(!changed);
        assert!(after.structurally_eq(&expr));
    }

    #[test]
    fn iteration_limit() {
        // grows the tree on every pass
        let grow = Rule::new("grow", Expr::call("f", vec![Expr::wild("a")]), Expr::call("f", vec![Expr::call("f", vec![Expr::wild("a")])]));
        let result = rewrite_fully(&parse("f(x)"), &[grow], 3).unwrap();

        assert_eq!(result.outcome, RewriteOutcome::IterationLimit);
        assert_eq!(result.passes, 3);
    }
}
