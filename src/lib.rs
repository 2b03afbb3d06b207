//! # operon
//!
//! operon is a numeric expression interpreter with an open grammar. Its
//! operators and modifiers live in a registry of precedence tiers that can be
//! reordered or extended, and the parser is driven entirely by that registry.
//! Variables support chained and deferred assignment, ternaries pick branches
//! lazily, and user functions are identified by name and arity.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{environment::Environment, value::core::Value},
};

/// Defines the element tree.
///
/// This module declares [`ast::Element`] and the node types it is built from:
/// operations, modifications, calls, containers, messengers, and the shared
/// [`ast::Reference`] and [`ast::Function`] entities the tables hold.
///
/// # Responsibilities
/// - Defines the node types produced by parsing and consumed by evaluation.
/// - Prints trees fully parenthesized (`Display`) or with the minimal
///   parentheses a grammar needs (`render`).
pub mod ast;
/// Provides unified error types for every stage.
///
/// This module defines all errors that can be raised while building a
/// grammar, tokenizing, parsing, executing or running commands, and the
/// aggregate [`error::Error`] returned at the statement boundary.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together tokenizing, grammar lookup, parsing, evaluation
/// and the environment. It exposes the public API for parsing and evaluating
/// lines.
pub mod interpreter;
/// Script preprocessing and the interactive loop.
pub mod repl;
/// General utilities for exact integer arithmetic.
pub mod util;

/// Runs a whole script in a fresh environment and returns the last present
/// value.
///
/// Statements are split by [`repl::statements`]. With `auto_print`, the last
/// present value is printed to standard output.
///
/// # Errors
/// Returns the first failing statement's line number and error.
///
/// # Examples
/// ```
/// use operon::{evaluate, interpreter::value::core::Number};
///
/// let source = "
/// :define square(x) = x * x
/// r = 3
/// square(r) + 1
/// ";
/// assert_eq!(evaluate(source, false).unwrap(), Some(Number::from(10)));
///
/// // Constants cannot be assigned.
/// let (line, _) = evaluate("x = 1\npi = 3", false).unwrap_err();
/// assert_eq!(line, 2);
/// ```
pub fn evaluate(source: &str, auto_print: bool) -> Result<Value, (usize, Error)> {
    let mut env = Environment::new();
    let mut result = None;

    for (line, statement) in repl::statements(source) {
        match env.run(&statement) {
            Ok(interpreter::environment::Outcome::Value(Some(value))) => result = Some(value),
            Ok(_) => {},
            Err(e) => return Err((line, e)),
        }
    }

    if auto_print && let Some(v) = &result {
        println!("{v}");
    }

    Ok(result)
}
