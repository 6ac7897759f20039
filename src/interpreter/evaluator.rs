/// Binary operator evaluation logic.
///
/// Routes every binary operation through an explicit table keyed by operand
/// kinds and operator, and implements arithmetic, exponentiation,
/// comparisons and string operations.
pub mod binary;

/// Core evaluation logic and the runtime environment.
///
/// Contains the `Environment`, the `Flow` signal type and the dispatch over
/// node kinds.
pub mod core;

/// Evaluation of `if` and `while` statements and statement blocks.
///
/// Loop control signals are consumed here by the nearest enclosing loop.
pub mod control_flow;
