use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{kind, Error},
    token::op::BinOp,
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there are binary operators of at least the given precedence and their right-hand-sides.
    ///
    /// If we are parsing the expression `1 + 2 * 3` with `lhs = 1`, we parse the operator `+`
    /// and then recurse to parse the right-hand-side with a higher minimum precedence, which
    /// picks up `2 * 3` as a whole since `*` binds tighter than `+`. A following operator with
    /// lower (or, for left-associative operators, equal) precedence ends the recursion and is
    /// picked up by this loop instead, which is how `1 * 2 + 3` becomes `(1 * 2) + 3`.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            let op = input.try_parse_then::<BinOp, _>(|op, input| {
                if op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            });
            let Ok(op) = op else {
                return Ok(lhs);
            };

            let rhs_precedence = match op.associativity() {
                Associativity::Left => op.precedence().tighter(),
                Associativity::Right => op.precedence(),
            };
            let rhs = Unary::parse_or_lower(input)?;
            let rhs = Self::parse_expr(input, rhs, rhs_precedence)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
