//! A small computer-algebra core built on pattern-based rewriting.
//!
//! Expressions ([`Expr`]) are immutable trees with a canonical form ([`canonical`]) that equality
//! and hashing are defined on. [`Rule`]s pair a pattern containing wildcards with a replacement
//! template; the [`pattern`] module matches them, and [`rewrite`] applies lists of rules pass by
//! pass until nothing changes. The [`solve`] module drives the rewriter towards a goal: full
//! simplification, or isolating a variable in an equation.
//!
//! ```
//! use cas_rewrite::{rules, solve, Expr, Symbol};
//!
//! let expr = "x + x".parse::<Expr>().unwrap();
//! let result = solve::simplify(&expr, rules::all()).unwrap();
//! assert_eq!(result.expr.to_string(), "2 * x");
//!
//! let equation = "2 * x + 5 = 15".parse::<Expr>().unwrap();
//! let result = solve::solve_equation(&equation, Symbol::new("x"), rules::all()).unwrap();
//! assert_eq!(result.expr.to_string(), "x = 5");
//! ```

pub mod canonical;
pub mod error;
pub mod expr;
pub mod pattern;
pub mod primitive;
pub mod rewrite;
pub mod rule;
pub mod rules;
pub mod solve;
pub mod step_collector;

pub use error::Error;
pub use expr::{Expr, Primary, Shape, Symbol, Wild, WildConstraint};
pub use pattern::{matches, substitute, Bindings};
pub use rewrite::{rewrite_fully, rewrite_once, RewriteOutcome, RewriteResult, Step};
pub use rule::Rule;
pub use solve::{SolveContext, SolveFailure, SolveResult, SolverStrategy};
