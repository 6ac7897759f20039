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
    util::num::repeat_count,
};

impl Environment {
    /// Concatenates two strings.
    pub fn eval_concat(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(unsupported(op, left, right, line)),
        }
    }

    /// Repeats a string an integer number of times.
    ///
    /// The integer may be on either side. A count of zero or less yields the
    /// empty string.
    ///
    /// # Errors
    /// `RuntimeError::Overflow` if the repeated string cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let text = Value::from("ab");
    ///
    /// let result = Environment::eval_repeat(BinaryOperator::Mul, &Value::Integer(3), &text, 1);
    /// assert_eq!(result.unwrap(), Value::from("ababab"));
    ///
    /// let result = Environment::eval_repeat(BinaryOperator::Mul, &text, &Value::Integer(-1), 1);
    /// assert_eq!(result.unwrap(), Value::from(""));
    /// ```
    pub fn eval_repeat(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        let (text, count) = match (left, right) {
            (Value::Str(s), Value::Integer(n)) | (Value::Integer(n), Value::Str(s)) => (s, *n),
            _ => return Err(unsupported(op, left, right, line)),
        };

        let count = repeat_count(count, line)?;
        if text.is_empty() || count == 0 {
            return Ok(Value::Str(String::new()));
        }

        let overflow = || RuntimeError::Overflow { line };
        let length = text.len().checked_mul(count).ok_or_else(overflow)?;
        let mut repeated = String::new();
        repeated.try_reserve_exact(length).map_err(|_| overflow())?;
        for _ in 0..count {
            repeated.push_str(text);
        }

        Ok(Value::Str(repeated))
    }
}
