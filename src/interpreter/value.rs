/// The `Value` type and its conversions.
///
/// Defines the tagged union every evaluation produces, its truthiness rules
/// and its textual rendering. Numeric widening from integers to floats goes
/// through the checked helpers in `util::num`.
pub mod core;
