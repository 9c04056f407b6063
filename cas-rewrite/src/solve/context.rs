use crate::expr::Symbol;
use crate::rule::Rule;

/// The number of iterations a strategy runs before giving up, unless configured otherwise.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// The configuration of one run of a [`SolverStrategy`](super::SolverStrategy).
#[derive(Debug, Clone)]
pub struct SolveContext<'a> {
    /// The rules to rewrite with, in priority order.
    pub rules: &'a [Rule],

    /// The variable to solve for. Only used by [`EquationSolver`](super::EquationSolver).
    pub target: Option<Symbol>,

    /// The maximum number of iterations the strategy may run.
    ///
    /// The default value is [`DEFAULT_MAX_ITERATIONS`].
    pub max_iterations: usize,

    /// Whether to record the intermediate expressions in [`SolveResult::trace`].
    ///
    /// The default value is `false`.
    ///
    /// [`SolveResult::trace`]: super::SolveResult::trace
    pub trace: bool,
}

impl<'a> SolveContext<'a> {
    /// Creates a context with the given rules and default options.
    pub fn new(rules: &'a [Rule]) -> Self {
        Self {
            rules,
            target: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            trace: false,
        }
    }

    /// Creates a builder starting from the default options.
    pub fn builder(rules: &'a [Rule]) -> SolveContextBuilder<'a> {
        SolveContextBuilder::new(rules)
    }
}

/// Helper struct to build a [`SolveContext`].
#[derive(Debug, Clone)]
pub struct SolveContextBuilder<'a>(SolveContext<'a>);

impl<'a> SolveContextBuilder<'a> {
    /// Creates a new builder with the given rules and default options.
    pub fn new(rules: &'a [Rule]) -> Self {
        Self(SolveContext::new(rules))
    }

    /// Replaces the rules to rewrite with.
    pub fn rules(mut self, rules: &'a [Rule]) -> Self {
        self.0.rules = rules;
        self
    }

    /// Sets the variable to solve for.
    pub fn target(mut self, target: impl Into<Symbol>) -> Self {
        self.0.target = Some(target.into());
        self
    }

    /// Sets the maximum number of iterations. See [`SolveContext::max_iterations`].
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Sets whether to record a trace. See [`SolveContext::trace`].
    pub fn trace(mut self, trace: bool) -> Self {
        self.0.trace = trace;
        self
    }

    /// Builds the [`SolveContext`].
    pub fn build(self) -> SolveContext<'a> {
        self.0
    }
}
