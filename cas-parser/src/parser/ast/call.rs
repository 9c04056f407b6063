use crate::parser::{
    ast::{expr::Expr, literal::LitSym},
    error::{kind, Error},
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constructors that take exactly two arguments: an operand and a variable (or vector of
/// variables).
pub const BINARY_CONSTRUCTORS: [&str; 5] = ["Derivative", "Integral", "Grad", "Div", "Curl"];

/// A function call, such as `sin(x)`, or a constructor call, such as `Vector(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function or constructor to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if this is a call to the `Vector` constructor.
    pub fn is_vector(&self) -> bool {
        self.name.name == "Vector"
    }

    /// Checks the argument structure of the constructor calls that have one.
    fn validate(&self) -> Result<(), Error> {
        let name = self.name.name.as_str();
        if BINARY_CONSTRUCTORS.contains(&name) && self.args.len() != 2 {
            return Err(Error::new(vec![self.span()], kind::WrongArity {
                name: name.to_string(),
                expected: 2,
                found: self.args.len(),
            }));
        }

        if name == "Matrix" {
            let mut row_len = None;
            for arg in &self.args {
                let Expr::Call(row) = arg else {
                    return Err(Error::new(vec![arg.span()], kind::InvalidMatrixRow { expected_len: None }));
                };
                if !row.is_vector() {
                    return Err(Error::new(vec![arg.span()], kind::InvalidMatrixRow { expected_len: None }));
                }

                match row_len {
                    None => row_len = Some(row.args.len()),
                    Some(len) if len != row.args.len() => {
                        return Err(Error::new(vec![arg.span()], kind::InvalidMatrixRow {
                            expected_len: Some(len),
                        }));
                    },
                    Some(_) => (),
                }
            }
        }

        Ok(())
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let args = input.parse_delimited::<Expr>(TokenKind::Comma, TokenKind::CloseParen)?;
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new(
                vec![open_paren.span.clone()],
                kind::UnclosedParenthesis { opening: true },
            ))?;

        let call = Self {
            span: name.span.start..close_paren.span.end,
            name,
            args,
            paren_span: open_paren.span.start..close_paren.span.end,
        };
        call.validate()?;
        Ok(call)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if let Some((last, rest)) = self.args.split_last() {
            for arg in rest {
                write!(f, "{}, ", arg)?;
            }
            write!(f, "{}", last)?;
        }
        write!(f, ")")
    }
}
