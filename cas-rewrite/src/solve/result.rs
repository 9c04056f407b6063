use crate::expr::Expr;
use thiserror::Error;

/// Why a strategy failed to produce a result.
///
/// These are outcomes, not errors: the [`SolveResult`] that carries one still holds the best
/// expression the strategy reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveFailure {
    /// The equation solver was given something other than an equation.
    #[error("expected an equation of the form `lhs = rhs`")]
    NotAnEquation,

    /// The equation solver was not told which variable to solve for.
    #[error("no target variable was given")]
    MissingTarget,

    /// The target variable does not occur in the equation.
    #[error("target variable `{0}` does not occur in the equation")]
    TargetAbsent(String),

    /// Neither side of the equation contains the target variable any more.
    #[error("no further progress achievable: target variable `{0}` could not be isolated")]
    NotIsolated(String),

    /// An iteration changed nothing.
    #[error("no further progress achievable")]
    Stagnant,

    /// The maximum number of iterations was reached.
    #[error("gave up after reaching the maximum of {0} iterations")]
    IterationLimit(usize),
}

/// The outcome of running a [`SolverStrategy`](super::SolverStrategy).
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The result on success, or the last expression reached on failure.
    pub expr: Expr,

    /// A human-readable description of the outcome.
    pub message: String,

    /// The intermediate expressions, in order, if tracing was enabled.
    pub trace: Option<Vec<Expr>>,

    /// Why the strategy failed, or [`None`] if it succeeded.
    pub failure: Option<SolveFailure>,
}

impl SolveResult {
    pub(crate) fn success(expr: Expr, message: impl Into<String>, trace: Option<Vec<Expr>>) -> Self {
        Self { expr, message: message.into(), trace, failure: None }
    }

    pub(crate) fn failure(expr: Expr, failure: SolveFailure, trace: Option<Vec<Expr>>) -> Self {
        Self { expr, message: failure.to_string(), trace, failure: Some(failure) }
    }

    /// Returns true if the strategy succeeded.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}
