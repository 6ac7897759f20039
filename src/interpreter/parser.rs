/// Parser entry points.
///
/// Defines the `Parser` cursor over a token slice and the top of the
/// expression grammar (assignment and augmented assignment).
pub mod core;

/// Binary operator parsing.
///
/// Comparison chains, additive and multiplicative levels, and
/// exponentiation.
pub mod binary;

/// Unary minus and primary expressions.
pub mod unary;

/// Statement parsing.
///
/// Dispatches on the leading keyword and parses `if` / `elif` / `else`,
/// `while` / `else`, `break` and `continue`.
pub mod statement;

/// Indented block parsing.
pub mod block;

/// Helpers for consuming structural tokens.
mod utils;
