use crate::canonical::canonicalize;
use crate::error::Error;
use crate::expr::{Expr, Primary};
use crate::rewrite::rewrite_fully;
use log::{debug, info};
use super::{isolate::{divides_by_zero, isolate}, SolveContext, SolveFailure, SolveResult, SolverStrategy};

/// Solves an equation for the target variable of the [`SolveContext`].
///
/// Each iteration simplifies the equation to a fixpoint, then peels one operation off the side
/// containing the target (see [`isolate`](super::isolate)). If both sides contain the target, the
/// equation is first rewritten to `lhs - rhs = 0`. The solver succeeds once one side is the bare
/// target and the other side does not contain it, and fails as soon as an iteration makes no
/// progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquationSolver;

/// If one side of the equation is the bare target and the other side does not contain it,
/// returns the other side. A value that divides by zero is not a solution.
fn solved_value<'a>(lhs: &'a Expr, rhs: &'a Expr, target: &str) -> Option<&'a Expr> {
    let is_target = |expr: &Expr| expr.as_symbol().is_some_and(|sym| sym.name == target);
    let value = if is_target(lhs) && !rhs.contains_symbol(target) {
        rhs
    } else if is_target(rhs) && !lhs.contains_symbol(target) {
        lhs
    } else {
        return None;
    };

    if divides_by_zero(value) {
        None
    } else {
        Some(value)
    }
}

/// Appends the expression to the trace, unless it is identical to the last entry.
fn record(trace: &mut Option<Vec<Expr>>, expr: &Expr) {
    if let Some(trace) = trace {
        if !trace.last().is_some_and(|last| last.structurally_eq(expr)) {
            trace.push(expr.clone());
        }
    }
}

/// Reports a failure, keeping the last expression reached.
fn fail(
    expr: &Expr,
    failure: SolveFailure,
    trace: Option<Vec<Expr>>,
) -> Result<SolveResult, Error> {
    info!("could not solve {}: {}", expr, failure);
    Ok(SolveResult::failure(expr.clone(), failure, trace))
}

impl EquationSolver {
    /// Builds the successful result `target = value`, simplifying the value once more.
    fn finish(
        &self,
        target: &Expr,
        value: &Expr,
        ctx: &SolveContext,
        mut trace: Option<Vec<Expr>>,
    ) -> Result<SolveResult, Error> {
        let value = rewrite_fully(value, ctx.rules, ctx.max_iterations)?.expr;
        let solution = Expr::equation(target.clone(), value);
        record(&mut trace, &solution);

        info!("solved: {}", solution);
        let message = format!("solved for {}", target);
        Ok(SolveResult::success(solution, message, trace))
    }
}

impl SolverStrategy for EquationSolver {
    fn name(&self) -> &'static str {
        "solve"
    }

    fn solve(&self, problem: &Expr, ctx: &SolveContext) -> Result<SolveResult, Error> {
        let mut trace = ctx.trace.then(Vec::new);

        if !matches!(problem, Expr::Eq(..)) {
            return fail(problem, SolveFailure::NotAnEquation, trace);
        }
        let Some(target) = &ctx.target else {
            return fail(problem, SolveFailure::MissingTarget, trace);
        };
        let name = target.name.as_str();
        if !problem.contains_symbol(name) {
            return fail(problem, SolveFailure::TargetAbsent(name.to_string()), trace);
        }

        let target = Expr::Primary(Primary::Symbol(target.clone()));
        let mut current = canonicalize(problem.clone());

        for iteration in 1..=ctx.max_iterations {
            debug!("iteration {}: {}", iteration, current);
            let mut progressed = false;

            let simplified = rewrite_fully(&current, ctx.rules, ctx.max_iterations)?.expr;
            if !simplified.structurally_eq(&current) {
                debug!("simplified: {}", simplified);
                progressed = true;
                current = simplified;
                record(&mut trace, &current);
            }

            let Expr::Eq(lhs, rhs) = &current else {
                return fail(&current, SolveFailure::NotAnEquation, trace);
            };
            if let Some(value) = solved_value(lhs, rhs, name) {
                return self.finish(&target, value, ctx, trace);
            }

            let (side, other) = match (lhs.contains_symbol(name), rhs.contains_symbol(name)) {
                (true, false) => (lhs, rhs),
                (false, true) => (rhs, lhs),
                (true, true) => {
                    // lhs = rhs  =>  lhs - rhs = 0
                    let lhs = (**lhs).clone() - (**rhs).clone();
                    current = canonicalize(Expr::equation(lhs, Expr::num(0)));
                    debug!("collected onto one side: {}", current);
                    record(&mut trace, &current);
                    continue;
                },
                (false, false) => {
                    return fail(&current, SolveFailure::NotIsolated(name.to_string()), trace);
                },
            };

            if let Some((side, other)) = isolate(side, other, name) {
                let next = canonicalize(Expr::equation(side, other));
                if !next.structurally_eq(&current) {
                    debug!("isolated: {}", next);
                    progressed = true;
                    current = next;
                    record(&mut trace, &current);

                    if let Expr::Eq(lhs, rhs) = &current {
                        if let Some(value) = solved_value(lhs, rhs, name) {
                            return self.finish(&target, value, ctx, trace);
                        }
                    }
                }
            }

            if !progressed {
                return fail(&current, SolveFailure::Stagnant, trace);
            }
        }

        fail(&current, SolveFailure::IterationLimit(ctx.max_iterations), trace)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::expr::Symbol;
    use crate::rules;
    use super::*;

    fn solve(s: &str, max_iterations: usize) -> SolveResult {
        let ctx = SolveContext::builder(rules::all())
            .target("x")
            .max_iterations(max_iterations)
            .trace(true)
            .build();
        EquationSolver.solve(&s.parse().unwrap(), &ctx).unwrap()
    }

    #[test]
    fn linear() {
        let result = solve("2 * x + 5 = 15", 100);

        assert!(result.is_success(), "{}", result.message);
        assert_eq!(result.expr.to_string(), "x = 5");
        assert_eq!(result.trace.unwrap().last(), Some(&result.expr));
    }

    #[test]
    fn target_on_the_right() {
        assert_eq!(solve("7 = 3 + x", 100).expr.to_string(), "x = 4");
    }

    #[test]
    fn target_on_both_sides() {
        let result = solve("3 * x = x + 8", 100);

        assert!(result.is_success(), "{}", result.message);
        assert_eq!(result.expr.to_string(), "x = 4");
    }

    #[test]
    fn nonlinear() {
        assert_eq!(solve("2 ** (x + 1) = y", 100).expr.to_string(), "x = log(y, 2) - 1");
        assert_eq!(solve("log(x, 3) = 2", 100).expr.to_string(), "x = 9");
        assert_eq!(solve("sin(x) = y", 100).expr.to_string(), "x = asin(y)");
    }

    #[test]
    fn no_solution() {
        let result = solve("x = x + 1", 100);

        assert!(!result.is_success());
        assert!(result.message.contains("no further progress"));
    }

    #[test]
    fn stagnation() {
        // two independent terms contain `x`, and no rule combines them
        let result = solve("x + sin(x) = 1", 100);

        assert_eq!(result.failure, Some(SolveFailure::Stagnant));
        assert_eq!(result.expr.to_string(), "x + sin(x) = 1");
    }

    #[test]
    fn zero_division_is_blocked() {
        for problem in ["6 / x = 0", "1 / x = 0", "x ** -1 = 0", "x ** -2 = 0", "y / (x + 1) = 0"] {
            let result = solve(problem, 100);
            assert_eq!(result.failure, Some(SolveFailure::Stagnant), "{}: {}", problem, result.expr);
        }
    }

    #[test]
    fn undefined_value_is_not_a_solution() {
        let result = solve("x = 0 ** -1", 100);

        assert_eq!(result.failure, Some(SolveFailure::Stagnant));
        assert_eq!(result.expr.to_string(), "x = 0 ** (-1)");
    }

    #[test]
    fn iteration_limit() {
        let result = solve("2 * x + 5 = 15", 1);

        assert_eq!(result.failure, Some(SolveFailure::IterationLimit(1)));
    }

    #[test]
    fn invalid_problems() {
        let ctx = SolveContext::new(rules::all());
        let missing = EquationSolver.solve(&"x = 1".parse().unwrap(), &ctx).unwrap();
        assert_eq!(missing.failure, Some(SolveFailure::MissingTarget));

        let ctx = SolveContext::builder(rules::all()).target(Symbol::new("y")).build();
        let absent = EquationSolver.solve(&"x = 1".parse().unwrap(), &ctx).unwrap();
        assert_eq!(absent.failure, Some(SolveFailure::TargetAbsent("y".to_string())));

        let not_eq = EquationSolver.solve(&"x + 1".parse().unwrap(), &ctx).unwrap();
        assert_eq!(not_eq.failure, Some(SolveFailure::NotAnEquation));
    }
}
