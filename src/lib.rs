//! # pyrite
//!
//! pyrite is a small interpreter for an indentation-sensitive, Python-like
//! scripting language written in Rust.
//! It tokenizes, parses and evaluates statements with integers, floats,
//! strings and booleans, chained comparisons, `if` / `elif` / `else` and
//! `while` / `else` loops with `break` and `continue`.

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

use tracing::debug;

use crate::{
    ast::NodeKind,
    error::InterpreterError,
    interpreter::{
        evaluator::core::Environment, lexer::tokenize, parser::core::Parser, value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one closed node type covering expressions and statements.
/// - Attaches source lines to AST nodes for error reporting.
/// - Renders nodes back to source-like text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Every error carries the line it occurred on and
/// renders as a single descriptive message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer and parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive read-eval-print loop.
///
/// Assembles multi-line blocks from input lines, runs them through a
/// [`Session`] and prints the results.
pub mod repl;
/// General utilities for safe numeric conversion.
///
/// This module provides conversion routines used by the evaluator for mixed
/// integer and float arithmetic.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `usize`, and `f64` without silent
///   data loss.
pub mod util;

/// The result of one top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Kind of the statement's root node.
    pub kind:  NodeKind,
    /// The statement's value, if it produced one.
    pub value: Option<Value>,
}

impl Evaluation {
    /// The text an interactive prompt shows for this statement.
    ///
    /// Assignments, `if` and `while` statements are never echoed, and
    /// neither is a statement without a value.
    ///
    /// # Example
    /// ```
    /// use pyrite::Session;
    ///
    /// let mut session = Session::new();
    /// let results = session.run("x = 5\nx * 2").unwrap();
    ///
    /// assert_eq!(results[0].echo(), None);
    /// assert_eq!(results[1].echo(), Some("10".to_string()));
    /// ```
    #[must_use]
    pub fn echo(&self) -> Option<String> {
        match self.kind {
            NodeKind::Assignment | NodeKind::If | NodeKind::While => None,
            _ => self.value.as_ref().map(ToString::to_string),
        }
    }
}

/// An interpreter session.
///
/// A session owns one [`Environment`] for its whole lifetime, so variables
/// assigned by one call to [`Session::run`] are visible to the next.
#[derive(Debug, Default)]
pub struct Session {
    environment: Environment,
}

impl Session {
    /// Creates a session with an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The variables assigned so far.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Runs a block of source text.
    ///
    /// The whole text is tokenized and parsed before any statement is
    /// evaluated, so a syntax error never leaves partial changes behind.
    /// Statements are then evaluated in order; evaluation stops at the first
    /// runtime error, keeping the changes made by the statements before it.
    ///
    /// # Returns
    /// One [`Evaluation`] per top-level statement.
    ///
    /// # Errors
    /// `InterpreterError::Parse` for lexical or syntax errors and
    /// `InterpreterError::Runtime` for evaluation errors.
    ///
    /// # Example
    /// ```
    /// use pyrite::{Session, interpreter::value::core::Value};
    ///
    /// let mut session = Session::new();
    /// session.run("x = 5").unwrap();
    ///
    /// let results = session.run("x == 5").unwrap();
    /// assert_eq!(results[0].value, Some(Value::Bool(true)));
    ///
    /// assert!(session.run("y").is_err());
    /// ```
    pub fn run(&mut self, source: &str) -> Result<Vec<Evaluation>, InterpreterError> {
        let mut results = Vec::new();
        self.run_each(source, |evaluation| results.push(evaluation))?;
        Ok(results)
    }

    /// Runs a block of source text, handing each statement's [`Evaluation`]
    /// to `on_result` as soon as the statement finishes.
    ///
    /// Parsing and error behavior are the same as for [`Session::run`]. The
    /// difference is that the results of the statements before a runtime
    /// error have already been delivered when the error is returned.
    ///
    /// # Errors
    /// Same as [`Session::run`].
    ///
    /// # Example
    /// ```
    /// use pyrite::Session;
    ///
    /// let mut session = Session::new();
    /// let mut echoed = Vec::new();
    ///
    /// let result = session.run_each("1 + 1\nmissing", |evaluation| {
    ///                         echoed.extend(evaluation.echo());
    ///                     });
    ///
    /// assert!(result.is_err());
    /// assert_eq!(echoed, vec!["2".to_string()]);
    /// ```
    pub fn run_each<F>(&mut self, source: &str, mut on_result: F) -> Result<(), InterpreterError>
        where F: FnMut(Evaluation)
    {
        let tokens = tokenize(source)?;
        let program = Parser::new(&tokens).parse_program()?;
        debug!(statements = program.len(), "running program");

        for statement in &program {
            let value = self.environment.eval_statement(statement)?;
            on_result(Evaluation { kind: statement.kind(),
                                   value });
        }

        Ok(())
    }
}

/// Evaluates source text in a fresh session.
///
/// # Returns
/// The value of the last statement, or `None` if it produced no value or the
/// source is empty.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use pyrite::{evaluate, interpreter::value::core::Value};
///
/// assert_eq!(evaluate("2 + 3 * 4").unwrap(), Some(Value::Integer(14)));
/// assert_eq!(evaluate("'ab' * 3").unwrap(), Some(Value::from("ababab")));
///
/// // 'x' is not defined
/// assert!(evaluate("y = x + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Option<Value>, InterpreterError> {
    let results = Session::new().run(source)?;
    Ok(results.into_iter().last().and_then(|evaluation| evaluation.value))
}
