use std::fmt;
use super::{Expr, Primary};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes whether an expression stands for a scalar, a vector or a matrix.
///
/// Shapes are descriptive only: they are used to constrain wildcards and to display symbols, and
/// are never checked for consistency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// A single value.
    #[default]
    Scalar,

    /// A vector with the given number of components.
    Vector(usize),

    /// A matrix with the given number of rows and columns.
    Matrix(usize, usize),
}

impl Shape {
    /// Returns true if the shape is [`Shape::Scalar`].
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Vector(n) => write!(f, "vector({})", n),
            Self::Matrix(rows, cols) => write!(f, "matrix({}x{})", rows, cols),
        }
    }
}

impl Expr {
    /// Infers the shape of this expression from its structure.
    ///
    /// Sums and products take the shape of their first non-scalar operand. Calls to functions
    /// other than the vector calculus constructors are assumed to be scalar.
    pub fn shape(&self) -> Shape {
        fn first_non_scalar<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> Shape {
            exprs
                .into_iter()
                .map(Expr::shape)
                .find(|shape| !shape.is_scalar())
                .unwrap_or_default()
        }

        match self {
            Self::Primary(Primary::Symbol(sym)) => sym.shape,
            Self::Primary(_) | Self::Call(..) => Shape::Scalar,
            Self::Add(ops) | Self::Mul(ops) => first_non_scalar(ops),
            Self::Sub(lhs, rhs) => first_non_scalar([&**lhs, &**rhs]),
            Self::Div(lhs, _)
                | Self::Exp(lhs, _)
                | Self::Eq(lhs, _)
                | Self::Derivative(lhs, _)
                | Self::Integral(lhs, _) => lhs.shape(),
            Self::Grad(_, vars) => match &**vars {
                Self::Vector(vars) => Shape::Vector(vars.len()),
                _ => Shape::Vector(1),
            },
            Self::Divergence(..) => Shape::Scalar,
            Self::Curl(..) => Shape::Vector(3),
            Self::Vector(components) => Shape::Vector(components.len()),
            Self::Matrix(rows) => {
                let cols = match rows.first() {
                    Some(Self::Vector(row)) => row.len(),
                    _ => 0,
                };
                Shape::Matrix(rows.len(), cols)
            },
        }
    }
}
