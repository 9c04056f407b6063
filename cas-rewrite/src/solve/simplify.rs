use crate::canonical::canonicalize;
use crate::error::Error;
use crate::expr::Expr;
use crate::rewrite::rewrite_once;
use log::{debug, info};
use super::{SolveContext, SolveFailure, SolveResult, SolverStrategy};

/// Simplifies an expression by rewriting it until no rule applies.
///
/// Each iteration is a single rewrite pass, so the trace holds one entry per pass that changed
/// the expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullSimplification;

impl SolverStrategy for FullSimplification {
    fn name(&self) -> &'static str {
        "simplify"
    }

    fn solve(&self, problem: &Expr, ctx: &SolveContext) -> Result<SolveResult, Error> {
        let mut trace = ctx.trace.then(Vec::new);
        let mut current = canonicalize(problem.clone());

        for pass in 0..ctx.max_iterations {
            let (next, changed) = rewrite_once(&current, ctx.rules)?;
            if !changed {
                info!("simplified to {} after {} pass(es)", current, pass);
                let message = format!("simplified after {} pass(es)", pass);
                return Ok(SolveResult::success(current, message, trace));
            }

            debug!("pass {}: {}", pass + 1, next);
            if let Some(trace) = &mut trace {
                trace.push(next.clone());
            }
            current = next;
        }

        info!("simplification stopped at the iteration limit: {}", current);
        Ok(SolveResult::failure(current, SolveFailure::IterationLimit(ctx.max_iterations), trace))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::rules;
    use super::*;

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    #[test]
    fn one_trace_entry_per_changed_pass() {
        let ctx = SolveContext::builder(rules::all()).trace(true).build();
        let result = FullSimplification.solve(&parse("x + x + x + x"), &ctx).unwrap();

        assert!(result.is_success());
        assert_eq!(result.expr.to_string(), "4 * x");
        let trace = result.trace.unwrap();
        assert_eq!(trace.last().map(ToString::to_string).as_deref(), Some("4 * x"));
        assert!(!trace.is_empty());
    }

    #[test]
    fn no_trace_unless_enabled() {
        let result = FullSimplification.solve(&parse("x + x"), &SolveContext::new(rules::all())).unwrap();

        assert!(result.trace.is_none());
    }

    #[test]
    fn iteration_limit() {
        let ctx = SolveContext::builder(rules::all()).max_iterations(1).build();
        let result = FullSimplification.solve(&parse("Derivative(x ** 3, x)"), &ctx).unwrap();

        assert!(!result.is_success());
        assert_eq!(result.failure, Some(SolveFailure::IterationLimit(1)));
        assert_eq!(result.message, "gave up after reaching the maximum of 1 iterations");
    }
}
