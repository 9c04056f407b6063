//! The expression tree that every other module in this crate manipulates.
//!
//! An [`Expr`] is a closed, owned tree: atoms ([`Primary`]) at the leaves, and operations above
//! them. Trees are never mutated in place; every transformation consumes or clones its input and
//! returns a new tree.
//!
//! # Equality
//!
//! The [`PartialEq`], [`Eq`] and [`Hash`] implementations for [`Expr`] compare **canonical
//! forms**: both operands are canonicalized (see [`crate::canonical`]) and then compared
//! structurally. This means that `x + y` and `y + x` are equal, and so are `y * 0` and `0`.
//! Code that already holds canonical trees should use [`Expr::structurally_eq`], which skips the
//! canonicalization.
//!
//! # Recursion
//!
//! Most operations on trees (canonicalization, matching, substitution, rewriting) recurse once
//! per level of the tree, so their stack usage is proportional to the depth of the expression.
//! Searching the tree ([`Expr::post_order_iter`], [`Expr::contains_symbol`]) uses an explicit
//! stack instead.

mod ast;
mod fmt;
mod iter;
mod shape;

use crate::canonical::canonicalize;
pub use iter::ExprIter;
use rug::Rational;
use std::{convert::Infallible, hash::{Hash, Hasher}, ops::{Add, Div, Mul, Neg, Sub}};

pub use shape::Shape;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named variable, such as `x`, along with its [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    /// The name of the symbol.
    pub name: String,

    /// The shape of the value the symbol stands for. Symbols produced by the parser are scalars.
    pub shape: Shape,
}

impl Symbol {
    /// Creates a scalar symbol with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), shape: Shape::Scalar }
    }

    /// Creates a symbol with the given name and shape.
    pub fn with_shape(name: impl Into<String>, shape: Shape) -> Self {
        Self { name: name.into(), shape }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A restriction on what a [`Wild`] may bind to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WildConstraint {
    /// The wildcard matches any subexpression.
    #[default]
    Any,

    /// The wildcard only matches numeric literals.
    Constant,

    /// The wildcard only matches subexpressions whose [`Shape`] is scalar.
    Scalar,
}

/// A pattern placeholder. Wildcards only occur in rule patterns and templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wild {
    /// The name the matched subexpression is bound to.
    pub name: String,

    /// What the wildcard is allowed to match.
    pub constraint: WildConstraint,
}

/// A leaf of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An exact number, such as `2`, `2.5` or `1/3`.
    Number(Rational),

    /// A variable, such as `x`.
    Symbol(Symbol),

    /// A wildcard, such as `?a`.
    Wild(Wild),
}

/// The kind of an [`Expr`] node, without its payload.
///
/// The declaration order is the order in which kinds sort relative to each other in canonical
/// argument lists (see [`crate::canonical::order`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExprKind {
    Number,
    Symbol,
    Wild,
    Call,
    Exp,
    Mul,
    Add,
    Sub,
    Div,
    Eq,
    Derivative,
    Integral,
    Grad,
    Divergence,
    Curl,
    Vector,
    Matrix,
}

impl ExprKind {
    /// Returns true for the n-ary operations whose operands may be reordered.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number, symbol or wildcard.
    Primary(Primary),

    /// Terms added together.
    Add(Vec<Expr>),

    /// Factors multiplied together.
    Mul(Vec<Expr>),

    /// `lhs - rhs`.
    Sub(Box<Expr>, Box<Expr>),

    /// `lhs / rhs`.
    Div(Box<Expr>, Box<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),

    /// An equation, `lhs = rhs`.
    Eq(Box<Expr>, Box<Expr>),

    /// The derivative of an expression with respect to a variable.
    Derivative(Box<Expr>, Box<Expr>),

    /// The antiderivative of an expression with respect to a variable.
    Integral(Box<Expr>, Box<Expr>),

    /// The gradient of a scalar field over a vector of variables.
    Grad(Box<Expr>, Box<Expr>),

    /// The divergence of a vector field over a vector of variables. Written `Div(...)`.
    Divergence(Box<Expr>, Box<Expr>),

    /// The curl of a three-component vector field over three variables.
    Curl(Box<Expr>, Box<Expr>),

    /// A named function applied to arguments, such as `sin(x)` or `log(x, 2)`.
    Call(String, Vec<Expr>),

    /// A vector of components.
    Vector(Vec<Expr>),

    /// A matrix, stored as a list of row vectors.
    Matrix(Vec<Expr>),
}

/// Equality of canonical forms. See the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
            || canonicalize(self.clone()).structurally_eq(&canonicalize(other.clone()))
    }
}

impl Eq for Expr {}

/// Hashes the canonical form, consistent with [`PartialEq`].
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonicalize(self.clone()).hash_structure(state);
    }
}

impl Expr {
    /// Creates a numeric literal.
    pub fn num<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(Rational::from(n)))
    }

    /// Creates a numeric literal from a [`Rational`].
    pub fn rational(n: Rational) -> Self {
        Self::Primary(Primary::Number(n))
    }

    /// Creates a scalar symbol.
    pub fn sym(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(Symbol::new(name)))
    }

    /// Creates a symbol with the given shape.
    pub fn sym_with_shape(name: impl Into<String>, shape: Shape) -> Self {
        Self::Primary(Primary::Symbol(Symbol::with_shape(name, shape)))
    }

    /// Creates an unconstrained wildcard.
    pub fn wild(name: impl Into<String>) -> Self {
        Self::wild_with(name, WildConstraint::Any)
    }

    /// Creates a wildcard with the given constraint.
    pub fn wild_with(name: impl Into<String>, constraint: WildConstraint) -> Self {
        Self::Primary(Primary::Wild(Wild { name: name.into(), constraint }))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call(name.into(), args)
    }

    /// Creates a vector.
    pub fn vector(components: Vec<Expr>) -> Self {
        Self::Vector(components)
    }

    /// Creates an equation.
    pub fn equation(lhs: Expr, rhs: Expr) -> Self {
        Self::Eq(Box::new(lhs), Box::new(rhs))
    }

    /// Creates `base ^ exp`.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates `Derivative(expr, var)`.
    pub fn derivative(expr: Expr, var: Expr) -> Self {
        Self::Derivative(Box::new(expr), Box::new(var))
    }

    /// Creates `Integral(expr, var)`.
    pub fn integral(expr: Expr, var: Expr) -> Self {
        Self::Integral(Box::new(expr), Box::new(var))
    }

    /// Creates `Grad(field, vars)`.
    pub fn grad(field: Expr, vars: Expr) -> Self {
        Self::Grad(Box::new(field), Box::new(vars))
    }

    /// Creates `Div(field, vars)`, the divergence.
    pub fn divergence(field: Expr, vars: Expr) -> Self {
        Self::Divergence(Box::new(field), Box::new(vars))
    }

    /// Creates `Curl(field, vars)`.
    pub fn curl(field: Expr, vars: Expr) -> Self {
        Self::Curl(Box::new(field), Box::new(vars))
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Primary(Primary::Number(_)) => ExprKind::Number,
            Self::Primary(Primary::Symbol(_)) => ExprKind::Symbol,
            Self::Primary(Primary::Wild(_)) => ExprKind::Wild,
            Self::Add(_) => ExprKind::Add,
            Self::Mul(_) => ExprKind::Mul,
            Self::Sub(..) => ExprKind::Sub,
            Self::Div(..) => ExprKind::Div,
            Self::Exp(..) => ExprKind::Exp,
            Self::Eq(..) => ExprKind::Eq,
            Self::Derivative(..) => ExprKind::Derivative,
            Self::Integral(..) => ExprKind::Integral,
            Self::Grad(..) => ExprKind::Grad,
            Self::Divergence(..) => ExprKind::Divergence,
            Self::Curl(..) => ExprKind::Curl,
            Self::Call(..) => ExprKind::Call,
            Self::Vector(_) => ExprKind::Vector,
            Self::Matrix(_) => ExprKind::Matrix,
        }
    }

    /// Returns the direct children of this node, in order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Primary(_) => Vec::new(),
            Self::Add(ops)
                | Self::Mul(ops)
                | Self::Call(_, ops)
                | Self::Vector(ops)
                | Self::Matrix(ops) => ops.iter().collect(),
            Self::Sub(lhs, rhs)
                | Self::Div(lhs, rhs)
                | Self::Exp(lhs, rhs)
                | Self::Eq(lhs, rhs)
                | Self::Derivative(lhs, rhs)
                | Self::Integral(lhs, rhs)
                | Self::Grad(lhs, rhs)
                | Self::Divergence(lhs, rhs)
                | Self::Curl(lhs, rhs) => vec![lhs, rhs],
        }
    }

    /// Rebuilds this node with each child replaced by the result of `f`, stopping at the first
    /// error. Children are visited in order.
    pub fn try_map_children<E>(
        self,
        mut f: impl FnMut(Expr) -> Result<Expr, E>,
    ) -> Result<Self, E> {
        macro_rules! binary {
            ($variant:ident, $lhs:expr, $rhs:expr) => {{
                let lhs = f(*$lhs)?;
                let rhs = f(*$rhs)?;
                Self::$variant(Box::new(lhs), Box::new(rhs))
            }};
        }

        Ok(match self {
            Self::Primary(primary) => Self::Primary(primary),
            Self::Sub(lhs, rhs) => binary!(Sub, lhs, rhs),
            Self::Div(lhs, rhs) => binary!(Div, lhs, rhs),
            Self::Exp(lhs, rhs) => binary!(Exp, lhs, rhs),
            Self::Eq(lhs, rhs) => binary!(Eq, lhs, rhs),
            Self::Derivative(lhs, rhs) => binary!(Derivative, lhs, rhs),
            Self::Integral(lhs, rhs) => binary!(Integral, lhs, rhs),
            Self::Grad(lhs, rhs) => binary!(Grad, lhs, rhs),
            Self::Divergence(lhs, rhs) => binary!(Divergence, lhs, rhs),
            Self::Curl(lhs, rhs) => binary!(Curl, lhs, rhs),
            Self::Add(ops) => Self::Add(map_all(ops, &mut f)?),
            Self::Mul(ops) => Self::Mul(map_all(ops, &mut f)?),
            Self::Call(name, args) => Self::Call(name, map_all(args, &mut f)?),
            Self::Vector(ops) => Self::Vector(map_all(ops, &mut f)?),
            Self::Matrix(rows) => Self::Matrix(map_all(rows, &mut f)?),
        })
    }

    /// Rebuilds this node with each child replaced by the result of `f`.
    pub fn map_children(self, mut f: impl FnMut(Expr) -> Expr) -> Self {
        match self.try_map_children(|child| Ok::<_, Infallible>(f(child))) {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    /// Compares two trees exactly as they are, without canonicalizing them first.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Call(lhs_name, lhs), Self::Call(rhs_name, rhs)) => {
                lhs_name == rhs_name
                    && lhs.len() == rhs.len()
                    && lhs.iter().zip(rhs).all(|(l, r)| l.structurally_eq(r))
            },
            _ => {
                if self.kind() != other.kind() {
                    return false;
                }
                let (lhs, rhs) = (self.children(), other.children());
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| l.structurally_eq(r))
            },
        }
    }

    /// Feeds the exact structure of this tree into the hasher.
    fn hash_structure<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Primary(primary) => primary.hash(state),
            Self::Call(name, _) => name.hash(state),
            _ => (),
        }
        let children = self.children();
        children.len().hash(state);
        for child in children {
            child.hash_structure(state);
        }
    }

    /// If the expression is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a numeric literal.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if the expression is the literal `0`.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 0)
    }

    /// Returns true if the expression is the literal `1`.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 1)
    }

    /// Returns true if the expression is an integer literal.
    pub fn is_integer(&self) -> bool {
        self.as_number().is_some_and(|n| *n.denom() == 1)
    }

    /// If the expression is a symbol, returns a reference to it.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a wildcard, returns a reference to it.
    pub fn as_wild(&self) -> Option<&Wild> {
        match self {
            Self::Primary(Primary::Wild(wild)) => Some(wild),
            _ => None,
        }
    }

    /// Returns true if the symbol with the given name occurs anywhere in this tree.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter()
            .any(|expr| expr.as_symbol().is_some_and(|sym| sym.name == name))
    }

    /// Returns true if any wildcard occurs in this tree.
    pub fn contains_wild(&self) -> bool {
        self.post_order_iter().any(|expr| expr.as_wild().is_some())
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or the literal `0` or `1`.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::num(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::num(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Maps every expression in the list, stopping at the first error.
fn map_all<E>(
    exprs: Vec<Expr>,
    f: &mut impl FnMut(Expr) -> Result<Expr, E>,
) -> Result<Vec<Expr>, E> {
    exprs.into_iter().map(f).collect()
}

/// Adds two [`Expr`]s together. Sums on either side are flattened into one [`Expr::Add`].
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), rhs) => {
                terms.push(rhs);
                Self::Add(terms)
            },
            (lhs, Self::Add(mut terms)) => {
                terms.insert(0, lhs);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`Expr`]s together. Products on either side are flattened into one
/// [`Expr::Mul`].
impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), rhs) => {
                factors.push(rhs);
                Self::Mul(factors)
            },
            (lhs, Self::Mul(mut factors)) => {
                factors.insert(0, lhs);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        Self::Div(Box::new(self), Box::new(rhs))
    }
}

/// Negates a number directly, and multiplies anything else by `-1`.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::rational(-n),
            expr => Self::num(-1) * expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn equality_is_canonical() {
        let x = Expr::sym("x");
        let y = Expr::sym("y");

        assert_eq!(x.clone() + y.clone(), y.clone() + x.clone());
        assert_eq!(y.clone() * Expr::num(0), Expr::num(0));
        assert_ne!(x.clone() - y.clone(), y - x);
    }

    #[test]
    fn structural_equality_is_exact() {
        let x = Expr::sym("x");
        let y = Expr::sym("y");

        assert!(!(x.clone() + y.clone()).structurally_eq(&(y + x)));
    }

    #[test]
    fn hash_agrees_with_eq() {
        use std::collections::HashSet;

        let x = Expr::sym("x");
        let y = Expr::sym("y");
        let mut set = HashSet::new();
        set.insert(x.clone() + y.clone());
        set.insert(y + x);
        set.insert(Expr::num(2) * Expr::num(3));
        set.insert(Expr::num(6));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn contains_symbol() {
        let expr = Expr::call("sin", vec![Expr::sym("x") * Expr::num(2)]) + Expr::sym("y");

        assert!(expr.contains_symbol("x"));
        assert!(expr.contains_symbol("y"));
        assert!(!expr.contains_symbol("z"));
    }

    #[test]
    fn operators_flatten() {
        let expr = Expr::sym("a") + Expr::sym("b") + Expr::sym("c");
        assert_eq!(expr.children().len(), 3);

        let expr = Expr::sym("a") * (Expr::sym("b") * Expr::sym("c"));
        assert_eq!(expr.children().len(), 3);
    }

    #[test]
    fn negation() {
        assert!((-Expr::num(3)).structurally_eq(&Expr::num(-3)));
        assert!((-Expr::sym("x")).structurally_eq(&Expr::Mul(vec![Expr::num(-1), Expr::sym("x")])));
    }
}
