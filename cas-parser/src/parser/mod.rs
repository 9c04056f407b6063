pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use cas_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the expression language. This is the type to use to parse an
/// arbitrary piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Advances the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the kind of the next non-whitespace token without consuming it. Returns [`None`] at
    /// the end of the stream.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the kind of the `n`-th upcoming non-whitespace token (zero-based) without
    /// consuming anything.
    pub fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.is_whitespace())
            .nth(n)
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Parses values delimited by the given token kind until `close` is the next token. The
    /// closing token is not consumed. An empty list is allowed.
    pub fn parse_delimited<T: Parse>(
        &mut self,
        delimiter: TokenKind,
        close: TokenKind,
    ) -> Result<Vec<T>, Error> {
        let mut values = Vec::new();
        if self.peek_kind() == Some(close) {
            return Ok(values);
        }

        loop {
            values.push(T::parse(self)?);
            match self.peek_kind() {
                Some(kind) if kind == delimiter => {
                    self.next_token()?;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_whitespace();
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else if self.tokens[self.cursor].kind == TokenKind::CloseParen {
            Err(self.error(kind::UnclosedParenthesis { opening: false }))
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary operation is left-associative: `a op b op c` is parsed as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative: `a op b op c` is parsed as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of equations (`=`).
    Eq,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`**` or `^`).
    Exp,
}

impl Precedence {
    /// Returns the next higher precedence level. The highest level returns itself.
    pub fn tighter(self) -> Self {
        match self {
            Self::Any => Self::Eq,
            Self::Eq => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg | Self::Exp => Self::Exp,
        }
    }
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Call, Expr, Literal, LitNum, LitSym, LitWild, Paren, Unary};
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn binary(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_decimal() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("3.14", 0..4));
    }

    #[test]
    fn literal_wildcard() {
        let mut parser = Parser::new("?rest");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Wild(LitWild {
            name: "rest".to_string(),
            span: 0..5,
        })));
    }

    #[test]
    fn binary_left_associativity_mix_precedence() {
        let mut parser = Parser::new("3 + 4 * a + b");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, binary(
            binary(
                num("3", 0..1),
                BinOpKind::Add,
                2..3,
                binary(num("4", 4..5), BinOpKind::Mul, 6..7, sym("a", 8..9)),
            ),
            BinOpKind::Add,
            10..11,
            sym("b", 12..13),
        ));
    }

    #[test]
    fn binary_right_associativity() {
        let mut parser = Parser::new("1 ** 2 ^ 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, binary(
            num("1", 0..1),
            BinOpKind::Exp,
            2..4,
            binary(num("2", 5..6), BinOpKind::Exp, 7..8, num("3", 9..10)),
        ));
    }

    #[test]
    fn unary_binds_looser_than_power() {
        let mut parser = Parser::new("-x ** -2 * 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        let neg_two = Expr::Unary(Unary {
            operand: Box::new(num("2", 7..8)),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 6..7 },
            span: 6..8,
        });
        let power = binary(sym("x", 1..2), BinOpKind::Exp, 3..5, neg_two);
        let neg_power = Expr::Unary(Unary {
            operand: Box::new(power),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..8,
        });

        assert_eq!(expr, binary(neg_power, BinOpKind::Mul, 9..10, num("3", 11..12)));
    }

    #[test]
    fn equation_binds_loosest() {
        let mut parser = Parser::new("2 * x + 5 = 15");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, binary(
            binary(
                binary(num("2", 0..1), BinOpKind::Mul, 2..3, sym("x", 4..5)),
                BinOpKind::Add,
                6..7,
                num("5", 8..9),
            ),
            BinOpKind::Eq,
            10..11,
            num("15", 12..14),
        ));
    }

    #[test]
    fn parenthesized() {
        let mut parser = Parser::new("(x + y) * 1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, binary(
            Expr::Paren(Paren {
                expr: Box::new(binary(sym("x", 1..2), BinOpKind::Add, 3..4, sym("y", 5..6))),
                span: 0..7,
            }),
            BinOpKind::Mul,
            8..9,
            num("1", 10..11),
        ));
    }

    #[test]
    fn nested_calls() {
        let mut parser = Parser::new("Grad(5, Vector(x, y))");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "Grad".to_string(), span: 0..4 },
            args: vec![
                num("5", 5..6),
                Expr::Call(Call {
                    name: LitSym { name: "Vector".to_string(), span: 8..14 },
                    args: vec![sym("x", 15..16), sym("y", 18..19)],
                    span: 8..20,
                    paren_span: 14..20,
                }),
            ],
            span: 0..21,
            paren_span: 4..21,
        }));
    }

    #[test]
    fn display_round_trip() {
        let source = "log(x, 2) - -y / (a + b) ** 2 = 0";
        let mut parser = Parser::new(source);
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr.to_string(), source);
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_close_parenthesis() {
        let mut parser = Parser::new("x + 1)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("2 * ()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("x +");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn constructor_wrong_arity() {
        let mut parser = Parser::new("Grad(f)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![0..7]);
        assert!(format!("{:?}", err.kind).contains("WrongArity"));
    }

    #[test]
    fn matrix_rows_must_be_vectors() {
        let mut parser = Parser::new("Matrix(Vector(1, 2), x)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![21..22]);
    }

    #[test]
    fn matrix_rows_must_agree() {
        let mut parser = Parser::new("Matrix(Vector(1, 2), Vector(3))");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![21..30]);
    }

    #[test]
    fn matrix_ok() {
        let mut parser = Parser::new("Matrix(Vector(1, 0), Vector(0, 1))");
        assert!(parser.try_parse_full::<Expr>().is_ok());
    }
}
