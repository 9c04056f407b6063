//! Errors that can abort a rewrite.
//!
//! Failing to match is never an error, and neither is failing to solve: those are reported as
//! data (see [`SolveResult`](crate::solve::SolveResult)). The variants here describe rules that
//! cannot be applied at all.

use thiserror::Error;

/// A structural error raised while applying a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The replacement template refers to a wildcard that the pattern never bound.
    #[error("template refers to wildcard `?{name}`, which is not bound by the pattern")]
    UnboundWildcard {
        /// The name of the wildcard, without the leading `?`.
        name: String,
    },

    /// A rule failed to apply. Wraps the underlying error with the name of the rule.
    #[error("could not apply rule `{rule}`: {source}")]
    Rule {
        /// The name of the rule being applied.
        rule: String,

        /// The underlying error.
        #[source]
        source: Box<Error>,
    },
}
