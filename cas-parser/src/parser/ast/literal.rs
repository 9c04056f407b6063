use crate::{
    parser::{
        error::{kind, Error},
        token::{Float, Int, Name, Wild},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, either an integer (`12`) or a decimal (`2.5`). The text is kept as written
/// so that consumers can convert it to an exact numeric type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the number literal as written in the source.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input
            .try_parse::<Int>()
            .map(|int| Self { value: int.lexeme, span: int.span })
            .or_else(|_| {
                input
                    .try_parse::<Float>()
                    .map(|float| Self { value: float.lexeme, span: float.span })
            })
    }
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, such as `x` or `theta`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input
            .try_parse::<Name>()
            .map(|name| Self { name: name.lexeme, span: name.span })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A wildcard literal written `?name`, used to write rule patterns. The stored name does not
/// include the leading `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitWild {
    /// The name of the wildcard, without the leading `?`.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitWild {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input
            .try_parse::<Wild>()
            .map(|wild| Self {
                name: wild.lexeme.trim_start_matches('?').to_owned(),
                span: wild.span,
            })
    }
}

impl fmt::Display for LitWild {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// Represents a literal value in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),

    /// A wildcard literal.
    Wild(LitWild),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
            Literal::Wild(wild) => wild.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::Int | TokenKind::Float) => input.try_parse().map(Literal::Number),
            Some(TokenKind::Name) => input.try_parse().map(Literal::Symbol),
            Some(TokenKind::Wild) => input.try_parse().map(Literal::Wild),
            Some(found) => Err(input.error(kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name, TokenKind::Wild],
                found,
            })),
            None => Err(input.error(kind::UnexpectedEof)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(name) => name.fmt(f),
            Literal::Wild(wild) => wild.fmt(f),
        }
    }
}
