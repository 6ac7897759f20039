/// Numeric conversion helpers.
///
/// This module provides the conversions between integer and floating-point
/// types used by the evaluator. Widening an integer to a float rounds to the
/// nearest float; every narrowing conversion is checked and never saturates
/// silently. Mixed integer/float arithmetic, truncating division,
/// exponentiation and string repetition all go through these helpers.
pub mod num;
