use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Widens an `i64` to the nearest `f64`.
///
/// Integers beyond `2^53` in magnitude round to the closest representable
/// float, ties to even.
///
/// ## Example
/// ```
/// use pyrite::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(9_007_199_254_740_993), 9_007_199_254_740_992.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// Unlike a plain `as` cast this never saturates silently: infinities and NaN
/// are rejected, and so is any value outside the `i64` range.
///
/// ## Errors
/// - `RuntimeError::NonFiniteValue` for infinities and NaN.
/// - `RuntimeError::Overflow` when the truncated value does not fit in `i64`.
///
/// ## Example
/// ```
/// use pyrite::util::num::f64_trunc_to_i64_checked;
///
/// assert_eq!(f64_trunc_to_i64_checked(-3.9, 1).unwrap(), -3);
/// assert_eq!(f64_trunc_to_i64_checked(17.0, 1).unwrap(), 17);
/// assert!(f64_trunc_to_i64_checked(f64::NAN, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_trunc_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::NonFiniteValue { line });
    }
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(RuntimeError::Overflow { line });
    }
    Ok(truncated as i64)
}

/// Converts a non-negative `i64` exponent to `u32` for `checked_pow`.
///
/// Returns `None` if the value does not fit in `u32`.
#[must_use]
pub fn i64_to_u32_checked(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

/// Turns a repetition count into a `usize`, clamping non-positive counts to
/// zero.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the count does not fit in `usize`.
///
/// ## Example
/// ```
/// use pyrite::util::num::repeat_count;
///
/// assert_eq!(repeat_count(3, 1).unwrap(), 3);
/// assert_eq!(repeat_count(-1, 1).unwrap(), 0);
/// ```
pub fn repeat_count(count: i64, line: usize) -> EvalResult<usize> {
    if count <= 0 {
        return Ok(0);
    }
    usize::try_from(count).map_err(|_| RuntimeError::Overflow { line })
}
