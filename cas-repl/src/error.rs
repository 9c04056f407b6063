use ariadne::Source;
use cas_parser::parser::error::Error as ParseError;
use cas_rewrite::Error as RewriteError;
use std::io;

/// Utility enum to package errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// The input could not be parsed. `input` is the text the error's spans point into.
    ParseError {
        input: String,
        error: ParseError,
    },

    /// A rule could not be applied.
    RewriteError(RewriteError),

    /// The command itself was malformed.
    Usage(String),
}

impl Error {
    /// Parses an expression, keeping the input around so that a parse error can be reported
    /// against it.
    pub fn parse(input: &str) -> Result<cas_rewrite::Expr, Self> {
        input.parse().map_err(|error| Self::ParseError { input: input.to_string(), error })
    }

    /// Report the error to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so parse errors go through its `eprint` method.
    pub fn report_to_stderr(&self) -> io::Result<()> {
        match self {
            Self::ParseError { input, error } => {
                let report = error.build_report("input");
                report.eprint(("input", Source::from(input.as_str())))
            },
            Self::RewriteError(err) => {
                eprintln!("error: {}", err);
                Ok(())
            },
            Self::Usage(msg) => {
                eprintln!("{}", msg);
                Ok(())
            },
        }
    }
}

impl From<RewriteError> for Error {
    fn from(err: RewriteError) -> Self {
        Self::RewriteError(err)
    }
}
