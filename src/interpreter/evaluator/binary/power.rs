use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
    util::num::i64_to_u32_checked,
};

impl Environment {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses
    /// checked arithmetic and stays an integer. Exponents too large for
    /// `checked_pow` still give an integer for the bases `-1`, `0` and `1`.
    /// Every other case is computed in floating-point form with `powf`.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ** exponent`.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let b = Value::Integer(2);
    /// let e = Value::Integer(10);
    ///
    /// let result = Environment::eval_pow(BinaryOperator::Pow, &b, &e, 1).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Environment::eval_pow(BinaryOperator::Pow, &b, &Value::Integer(-2), 1);
    /// assert_eq!(result.unwrap(), Value::Float(0.25));
    ///
    /// let one = Value::Integer(1);
    /// let huge = Value::Integer(5_000_000_000);
    /// let result = Environment::eval_pow(BinaryOperator::Pow, &one, &huge, 1);
    /// assert_eq!(result.unwrap(), Value::Integer(1));
    /// ```
    pub fn eval_pow(_op: BinaryOperator,
                    base: &Value,
                    exponent: &Value,
                    line: usize)
                    -> EvalResult<Value> {
        match (base, exponent) {
            (Value::Integer(b), Value::Integer(e)) if *e >= 0 => match i64_to_u32_checked(*e) {
                Some(small) => b.checked_pow(small)
                                .map(Value::Integer)
                                .ok_or(RuntimeError::Overflow { line }),
                None => Ok(match b {
                    0 | 1 => Value::Integer(*b),
                    -1 => Value::Integer(if e % 2 == 0 { 1 } else { -1 }),
                    _ => Value::Float(base.as_real(line)?.powf(exponent.as_real(line)?)),
                }),
            },
            _ => Ok(Value::Float(base.as_real(line)?.powf(exponent.as_real(line)?))),
        }
    }
}
