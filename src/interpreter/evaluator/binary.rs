/// Operator table and dispatch.
///
/// Classifies the operand pair and looks up the handler for the operator.
pub mod core;

/// Arithmetic on integers and floats.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Relational operators and comparison chains.
pub mod comparison;

/// Concatenation and repetition of strings.
pub mod string;
