//! Conversion from the parser's abstract syntax tree into [`Expr`].

use cas_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    error::Error as ParseError,
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};
use crate::primitive::rational_from_decimal;
use std::str::FromStr;
use super::Expr;

impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Number(num) => Self::rational(rational_from_decimal(&num.value)),
                Literal::Symbol(sym) => Self::sym(sym.name),
                Literal::Wild(wild) => Self::wild(wild.name),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let name = call.name.name;
                let args = call.args.into_iter().map(Self::from).collect::<Vec<_>>();
                match name.as_str() {
                    "Vector" => Self::Vector(args),
                    "Matrix" => Self::Matrix(args),
                    _ => match <[Expr; 2]>::try_from(args) {
                        // the parser has already checked the arity of these constructors
                        Ok([lhs, rhs]) => match name.as_str() {
                            "Derivative" => Self::derivative(lhs, rhs),
                            "Integral" => Self::integral(lhs, rhs),
                            "Grad" => Self::grad(lhs, rhs),
                            "Div" => Self::divergence(lhs, rhs),
                            "Curl" => Self::curl(lhs, rhs),
                            _ => Self::Call(name, vec![lhs, rhs]),
                        },
                        Err(args) => Self::Call(name, args),
                    },
                }
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                    BinOpKind::Eq => Self::equation(lhs, rhs),
                }
            },
        }
    }
}

/// Parses a complete expression from source text.
impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(s).try_parse_full::<AstExpr>().map(Self::from)
    }
}
