use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::Literal,
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any expression that can be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function or constructor call, such as `sin(x)` or `Vector(x, y)`.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2` or `x = 5`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses an atom: a literal, a call or a parenthesized expression.
    ///
    /// A name immediately followed by `(` is always parsed as a call, so errors inside the
    /// argument list are reported instead of being hidden by backtracking.
    pub(crate) fn parse_atom(input: &mut Parser) -> Result<Self, Error> {
        match (input.peek_kind(), input.peek_nth_kind(1)) {
            (Some(TokenKind::OpenParen), _) => input.try_parse().map(Expr::Paren),
            (Some(TokenKind::Name), Some(TokenKind::OpenParen)) => Call::parse(input).map(Expr::Call),
            (Some(TokenKind::CloseParen), _) => Err(input.error(kind::UnclosedParenthesis { opening: false })),
            (Some(_), _) => input.try_parse().map(Expr::Literal),
            (None, _) => Err(input.error(kind::UnexpectedEof)),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
