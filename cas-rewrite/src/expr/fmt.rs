//! Precedence-aware rendering of [`Expr`] back into the infix syntax accepted by the parser.

use cas_parser::parser::Precedence;
use crate::primitive::{fmt_rational, is_terminating};
use rug::Rational;
use std::fmt::{self, Display, Formatter};
use super::{Expr, Primary, Symbol, Wild};

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Wild {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", fmt_rational(n)),
            Self::Symbol(sym) => sym.fmt(f),
            Self::Wild(wild) => wild.fmt(f),
        }
    }
}

impl Expr {
    /// Returns the precedence of the expression as it is displayed, or [`None`] if it displays
    /// as an atom that never needs parentheses.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(Primary::Number(n)) => {
                if *n < 0 {
                    Some(Precedence::Neg)
                } else if !is_terminating(n) {
                    // displayed as `n/d`
                    Some(Precedence::Factor)
                } else {
                    None
                }
            },
            Self::Primary(_) => None,
            Self::Add(_) | Self::Sub(..) => Some(Precedence::Term),
            Self::Mul(_) | Self::Div(..) => Some(Precedence::Factor),
            Self::Exp(..) => Some(Precedence::Exp),
            Self::Eq(..) => Some(Precedence::Eq),
            Self::Derivative(..)
                | Self::Integral(..)
                | Self::Grad(..)
                | Self::Divergence(..)
                | Self::Curl(..)
                | Self::Call(..)
                | Self::Vector(_)
                | Self::Matrix(_) => None,
        }
    }

    /// Returns true if this expression binds strictly looser than `prec`.
    fn looser_than(&self, prec: Precedence) -> bool {
        self.precedence().is_some_and(|p| p < prec)
    }

    /// Returns true if this expression binds no tighter than `prec`.
    fn at_most(&self, prec: Precedence) -> bool {
        self.precedence().is_some_and(|p| p <= prec)
    }

    /// If this term is displayed with a leading minus sign inside a sum, returns the term without
    /// it, so that the sum can be written as a subtraction.
    fn negated_term(&self) -> Option<Expr> {
        match self {
            Self::Primary(Primary::Number(n)) if *n < 0 => Some(Self::rational(-n.clone())),
            Self::Mul(factors) => {
                let (first, rest) = factors.split_first()?;
                let coeff = first.as_number().filter(|n| **n < 0)?;
                if *coeff == -1 {
                    Some(Self::Mul(rest.to_vec()).downgrade())
                } else {
                    let mut factors = factors.clone();
                    factors[0] = Self::rational(-coeff.clone());
                    Some(Self::Mul(factors))
                }
            },
            _ => None,
        }
    }
}

/// Writes the expression, wrapped in parentheses if `parens` is true.
fn operand(f: &mut Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes a comma-separated argument list, surrounded by parentheses.
fn args(f: &mut Formatter<'_>, name: &str, args: &[&Expr]) -> fmt::Result {
    write!(f, "{}(", name)?;
    let mut iter = args.iter();
    if let Some(arg) = iter.next() {
        write!(f, "{}", arg)?;
        for arg in iter {
            write!(f, ", {}", arg)?;
        }
    }
    write!(f, ")")
}

/// Writes a product, pulling a leading coefficient to the front and factors with negative
/// numeric exponents into the denominator.
fn product(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let (coeff, rest) = match factors.split_first() {
        Some((first, rest)) if first.is_number() => (first.as_number(), rest),
        _ => (None, factors),
    };

    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in rest {
        let reciprocal = match factor {
            Expr::Exp(base, exp) => exp.as_number()
                .filter(|n| **n < 0)
                .map(|n| (base, Rational::from(-n))),
            _ => None,
        };
        match reciprocal {
            Some((base, exp)) if exp == 1 => denom.push((**base).clone()),
            Some((base, exp)) => denom.push(Expr::pow((**base).clone(), Expr::rational(exp))),
            None => numer.push(factor),
        }
    }

    let mut wrote = false;
    match coeff {
        Some(c) if *c == -1 && !numer.is_empty() => write!(f, "-")?,
        Some(c) => {
            write!(f, "{}", fmt_rational(c))?;
            wrote = true;
        },
        None => (),
    }

    for factor in numer {
        if wrote {
            write!(f, " * ")?;
        }
        operand(f, factor, factor.looser_than(Precedence::Factor))?;
        wrote = true;
    }

    if !wrote {
        write!(f, "1")?;
    }

    for divisor in denom {
        write!(f, " / ")?;
        operand(f, &divisor, divisor.at_most(Precedence::Factor))?;
    }

    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => primary.fmt(f),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    operand(f, term, term.looser_than(Precedence::Term))?;
                }
                for term in iter {
                    match term.negated_term() {
                        Some(negated) => {
                            write!(f, " - ")?;
                            operand(f, &negated, negated.at_most(Precedence::Term))?;
                        },
                        None => {
                            write!(f, " + ")?;
                            operand(f, term, term.looser_than(Precedence::Term))?;
                        },
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => product(f, factors),
            Self::Sub(lhs, rhs) => {
                operand(f, lhs, lhs.looser_than(Precedence::Term))?;
                write!(f, " - ")?;
                operand(f, rhs, rhs.at_most(Precedence::Term))
            },
            Self::Div(lhs, rhs) => {
                operand(f, lhs, lhs.looser_than(Precedence::Factor))?;
                write!(f, " / ")?;
                operand(f, rhs, rhs.at_most(Precedence::Factor))
            },
            Self::Exp(base, exp) => {
                operand(f, base, base.at_most(Precedence::Exp))?;
                write!(f, " ** ")?;
                operand(f, exp, exp.looser_than(Precedence::Exp))
            },
            Self::Eq(lhs, rhs) => {
                operand(f, lhs, lhs.at_most(Precedence::Eq))?;
                write!(f, " = ")?;
                operand(f, rhs, rhs.at_most(Precedence::Eq))
            },
            Self::Derivative(expr, var) => args(f, "Derivative", &[expr, var]),
            Self::Integral(expr, var) => args(f, "Integral", &[expr, var]),
            Self::Grad(field, vars) => args(f, "Grad", &[field, vars]),
            Self::Divergence(field, vars) => args(f, "Div", &[field, vars]),
            Self::Curl(field, vars) => args(f, "Curl", &[field, vars]),
            Self::Call(name, call_args) => args(f, name, &call_args.iter().collect::<Vec<_>>()),
            Self::Vector(components) => args(f, "Vector", &components.iter().collect::<Vec<_>>()),
            Self::Matrix(rows) => args(f, "Matrix", &rows.iter().collect::<Vec<_>>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::sym("x")
    }

    fn y() -> Expr {
        Expr::sym("y")
    }

    #[test]
    fn numbers() {
        assert_eq!(Expr::num(5).to_string(), "5");
        assert_eq!(Expr::num((5, 2)).to_string(), "2.5");
        assert_eq!(Expr::num((1, 3)).to_string(), "1/3");
    }

    #[test]
    fn sums_show_subtraction() {
        let expr = Expr::Add(vec![
            Expr::Mul(vec![Expr::num(2), x()]),
            Expr::Mul(vec![Expr::num(-1), y()]),
            Expr::num(-5),
        ]);

        assert_eq!(expr.to_string(), "2 * x - y - 5");
    }

    #[test]
    fn negated_sum_keeps_parentheses() {
        let expr = Expr::Add(vec![
            x(),
            Expr::Mul(vec![Expr::num(-1), Expr::Add(vec![y(), Expr::num(1)])]),
        ]);

        assert_eq!(expr.to_string(), "x - (y + 1)");
    }

    #[test]
    fn products_show_division() {
        let expr = Expr::Mul(vec![
            Expr::num(3),
            x(),
            Expr::pow(y(), Expr::num(-1)),
            Expr::pow(Expr::sym("z"), Expr::num(-2)),
        ]);

        assert_eq!(expr.to_string(), "3 * x / y / z ** 2");
    }

    #[test]
    fn powers() {
        assert_eq!(Expr::pow(x(), Expr::num(-1)).to_string(), "x ** (-1)");
        assert_eq!(Expr::pow(Expr::num(-2), x()).to_string(), "(-2) ** x");
        assert_eq!(Expr::pow(x() + y(), Expr::num(2)).to_string(), "(x + y) ** 2");
        assert_eq!(Expr::Mul(vec![Expr::num(-1), Expr::pow(x(), Expr::num(2))]).to_string(), "-x ** 2");
    }

    #[test]
    fn constructors() {
        let vars = Expr::vector(vec![x(), y()]);

        assert_eq!(Expr::grad(Expr::num(5), vars.clone()).to_string(), "Grad(5, Vector(x, y))");
        assert_eq!(Expr::divergence(vars.clone(), vars).to_string(), "Div(Vector(x, y), Vector(x, y))");
        assert_eq!(Expr::call("log", vec![x(), Expr::num(2)]).to_string(), "log(x, 2)");
        assert_eq!(Expr::equation(x(), Expr::num(5)).to_string(), "x = 5");
    }
}
