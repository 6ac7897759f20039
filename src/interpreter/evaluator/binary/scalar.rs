use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{Environment, EvalResult},
        },
        value::core::Value,
    },
    util::num::{f64_trunc_to_i64_checked, i64_to_f64},
};

impl Environment {
    /// Evaluates `+ - * / // %` on two numbers.
    ///
    /// Two integers stay integers (checked against overflow), except for `/`
    /// which always produces a float. If either side is a float both are
    /// widened to floats. `//` and `%` truncate both operands toward zero and
    /// then perform integer division or remainder, so `-7 // 2` is `-3` and
    /// `-7 % 2` is `-1`; with a float operand the truncated result is
    /// returned as a float.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::DivisionByZero` for `/`, `//` or `%` by zero. For `//`
    ///   and `%` the check applies to the truncated right operand.
    /// - `RuntimeError::Overflow` when an integer result does not fit.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let x = Value::Float(1.5);
    /// let y = Value::Integer(2);
    ///
    /// let result = Environment::eval_arithmetic(BinaryOperator::Mul, &x, &y, 1).unwrap();
    /// assert_eq!(result, Value::Float(3.0));
    ///
    /// let result = Environment::eval_arithmetic(BinaryOperator::Div, &y, &y, 1).unwrap();
    /// assert_eq!(result, Value::Float(1.0));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                Self::eval_integer_arithmetic(op, *a, *b, line).map_err(|err| match err {
                    ArithmeticError::Unsupported => unsupported(op, left, right, line),
                    ArithmeticError::Runtime(err) => err,
                })
            },
            _ => {
                let a = left.as_real(line)?;
                let b = right.as_real(line)?;
                Self::eval_float_arithmetic(op, a, b, line).map_err(|err| match err {
                    ArithmeticError::Unsupported => unsupported(op, left, right, line),
                    ArithmeticError::Runtime(err) => err,
                })
            },
        }
    }

    fn eval_integer_arithmetic(op: BinaryOperator,
                               a: i64,
                               b: i64,
                               line: usize)
                               -> Result<Value, ArithmeticError> {
        let overflow = || RuntimeError::Overflow { line };

        Ok(Value::Integer(match op {
                              BinaryOperator::Add => a.checked_add(b).ok_or_else(overflow)?,
                              BinaryOperator::Sub => a.checked_sub(b).ok_or_else(overflow)?,
                              BinaryOperator::Mul => a.checked_mul(b).ok_or_else(overflow)?,
                              BinaryOperator::Div => {
                                  if b == 0 {
                                      return Err(RuntimeError::DivisionByZero { line }.into());
                                  }
                                  return Ok(Value::Float(i64_to_f64(a) / i64_to_f64(b)));
                              },
                              BinaryOperator::FloorDiv => truncating(a, b, i64::checked_div, line)?,
                              BinaryOperator::Mod => truncating(a, b, i64::checked_rem, line)?,
                              _ => return Err(ArithmeticError::Unsupported),
                          }))
    }

    fn eval_float_arithmetic(op: BinaryOperator,
                             a: f64,
                             b: f64,
                             line: usize)
                             -> Result<Value, ArithmeticError> {
        Ok(Value::Float(match op {
                            BinaryOperator::Add => a + b,
                            BinaryOperator::Sub => a - b,
                            BinaryOperator::Mul => a * b,
                            BinaryOperator::Div => {
                                if b == 0.0 {
                                    return Err(RuntimeError::DivisionByZero { line }.into());
                                }
                                a / b
                            },
                            BinaryOperator::FloorDiv | BinaryOperator::Mod => {
                                let a = f64_trunc_to_i64_checked(a, line)?;
                                let b = f64_trunc_to_i64_checked(b, line)?;
                                let result = if op == BinaryOperator::FloorDiv {
                                    truncating(a, b, i64::checked_div, line)?
                                } else {
                                    truncating(a, b, i64::checked_rem, line)?
                                };
                                i64_to_f64(result)
                            },
                            _ => return Err(ArithmeticError::Unsupported),
                        }))
    }
}

/// Failure of an arithmetic helper. `Unsupported` is turned into an
/// `UnsupportedOperation` by the caller, which still has the operand values.
enum ArithmeticError {
    Unsupported,
    Runtime(RuntimeError),
}

impl From<RuntimeError> for ArithmeticError {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

/// Applies a truncating integer division or remainder.
///
/// `i64::checked_div` and `i64::checked_rem` round toward zero, which is
/// exactly the required semantics. They also fail for `i64::MIN / -1`.
fn truncating(a: i64,
              b: i64,
              operation: fn(i64, i64) -> Option<i64>,
              line: usize)
              -> EvalResult<i64> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    operation(a, b).ok_or(RuntimeError::Overflow { line })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::Integer(n)
    }

    #[test]
    fn truncating_division_rounds_toward_zero() {
        let eval = |op, a, b| Environment::eval_arithmetic(op, &int(a), &int(b), 1).unwrap();

        assert_eq!(eval(BinaryOperator::FloorDiv, -7, 2), int(-3));
        assert_eq!(eval(BinaryOperator::Mod, -7, 2), int(-1));
        assert_eq!(eval(BinaryOperator::FloorDiv, 7, -2), int(-3));
        assert_eq!(eval(BinaryOperator::Mod, 7, -2), int(1));
    }

    #[test]
    fn float_floor_division_truncates_operands_first() {
        let result = Environment::eval_arithmetic(BinaryOperator::FloorDiv,
                                                  &Value::Float(17.0),
                                                  &int(9),
                                                  1).unwrap();
        assert_eq!(result, Value::Float(1.0));

        let result = Environment::eval_arithmetic(BinaryOperator::Mod,
                                                  &Value::Float(7.9),
                                                  &Value::Float(2.5),
                                                  1).unwrap();
        assert_eq!(result, Value::Float(1.0));
    }

    #[test]
    fn zero_divisors_are_rejected() {
        for op in [BinaryOperator::Div, BinaryOperator::FloorDiv, BinaryOperator::Mod] {
            assert_eq!(Environment::eval_arithmetic(op, &int(5), &int(0), 2),
                       Err(RuntimeError::DivisionByZero { line: 2 }));
        }
        // Truncates to zero.
        assert_eq!(Environment::eval_arithmetic(BinaryOperator::Mod,
                                                &int(5),
                                                &Value::Float(0.5),
                                                2),
                   Err(RuntimeError::DivisionByZero { line: 2 }));
    }

    #[test]
    fn integer_overflow_is_reported() {
        assert_eq!(Environment::eval_arithmetic(BinaryOperator::Add, &int(i64::MAX), &int(1), 3),
                   Err(RuntimeError::Overflow { line: 3 }));
        assert_eq!(Environment::eval_arithmetic(BinaryOperator::FloorDiv,
                                                &int(i64::MIN),
                                                &int(-1),
                                                3),
                   Err(RuntimeError::Overflow { line: 3 }));
    }
}
