//! Tokenizer and parser for infix algebra expressions.
//!
//! The grammar covers numbers, names, `?name` wildcards, unary minus, `**` (or `^`) powers,
//! `*` / `/`, `+` / `-`, `=` equations, parentheses and `Name(arg, ...)` calls. Calls to the
//! constructors `Derivative`, `Integral`, `Grad`, `Div`, `Curl` and `Matrix` are validated while
//! parsing.

pub mod parser;
pub mod tokenizer;
