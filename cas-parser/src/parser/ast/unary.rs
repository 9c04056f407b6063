use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::op::UnaryOp,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression if the next token is a prefix operator, or an atom otherwise.
    ///
    /// The operand of a prefix operator extends over every operator that binds tighter than it,
    /// so `-x ** 2` parses as `-(x ** 2)` while `-x * 2` parses as `(-x) * 2`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse::<UnaryOp>() {
            Ok(op) => {
                let operand = Self::parse_or_lower(input)?;
                let operand = Binary::parse_expr(input, operand, op.precedence().tighter())?;
                let span = op.span.start..operand.span().end;
                Ok(Expr::Unary(Self {
                    operand: Box::new(operand),
                    op,
                    span,
                }))
            },
            Err(_) => Expr::parse_atom(input),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}
