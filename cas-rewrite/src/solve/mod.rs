//! Strategies that drive the rewriter towards a goal.
//!
//! A [`SolverStrategy`] takes a problem expression and a [`SolveContext`], and returns a
//! [`SolveResult`]. Whether the strategy succeeded is part of the result, not an error: the
//! [`Err`] case is reserved for rules that cannot be applied at all (see [`Error`]).
//!
//! - [`FullSimplification`] rewrites until no rule applies.
//! - [`EquationSolver`] isolates a target variable on one side of an equation.

mod context;
mod equation;
mod isolate;
mod result;
mod simplify;

use crate::error::Error;
use crate::expr::{Expr, Symbol};
use crate::rule::Rule;

pub use context::{SolveContext, SolveContextBuilder, DEFAULT_MAX_ITERATIONS};
pub use equation::EquationSolver;
pub use result::{SolveFailure, SolveResult};
pub use simplify::FullSimplification;

/// A way of transforming a problem expression into a result.
pub trait SolverStrategy {
    /// A short name for the strategy.
    fn name(&self) -> &'static str;

    /// Runs the strategy on the problem.
    fn solve(&self, problem: &Expr, ctx: &SolveContext) -> Result<SolveResult, Error>;
}

/// Simplifies the expression with the given rules, using the default options.
pub fn simplify(expr: &Expr, rules: &[Rule]) -> Result<SolveResult, Error> {
    FullSimplification.solve(expr, &SolveContext::new(rules))
}

/// Solves the equation for `target` with the given rules, using the default options.
pub fn solve_equation(expr: &Expr, target: Symbol, rules: &[Rule]) -> Result<SolveResult, Error> {
    let ctx = SolveContext::builder(rules).target(target).build();
    EquationSolver.solve(expr, &ctx)
}
