use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{Environment, EvalResult},
        },
        value::core::Value,
    },
};

impl Environment {
    /// Evaluates a numeric comparison of the form `Value <Operator> Value`.
    ///
    /// Two integers are compared exactly. If either side is a float, both
    /// are widened to floats first. Comparisons involving NaN are false,
    /// except `!=`.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let a = Value::Integer(3);
    /// let b = Value::Float(5.0);
    ///
    /// let result = Environment::eval_numeric_comparison(BinaryOperator::Less, &a, &b, 1);
    ///
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_numeric_comparison(op: BinaryOperator,
                                   left: &Value,
                                   right: &Value,
                                   line: usize)
                                   -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => left.as_real(line)?.partial_cmp(&right.as_real(line)?),
        };

        op.holds_for(ordering)
          .map(Value::Bool)
          .ok_or_else(|| unsupported(op, left, right, line))
    }

    /// Compares two strings by code point, lexicographically.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let upper = Value::from("A");
    /// let lower = Value::from("a");
    ///
    /// let result = Environment::eval_string_comparison(BinaryOperator::Less, &upper, &lower, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_string_comparison(op: BinaryOperator,
                                  left: &Value,
                                  right: &Value,
                                  line: usize)
                                  -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        };

        ordering.and_then(|ordering| op.holds_for(Some(ordering)))
                .map(Value::Bool)
                .ok_or_else(|| unsupported(op, left, right, line))
    }

    /// Evaluates `==` and `!=` on two booleans.
    pub fn eval_bool_equality(op: BinaryOperator,
                              left: &Value,
                              right: &Value,
                              line: usize)
                              -> EvalResult<Value> {
        match (op, left, right) {
            (BinaryOperator::Equal | BinaryOperator::NotEqual,
             Value::Bool(a),
             Value::Bool(b)) => Ok(Value::Bool((a == b) == (op == BinaryOperator::Equal))),
            _ => Err(unsupported(op, left, right, line)),
        }
    }

    /// Evaluates a comparison chain such as `a < b <= c`.
    ///
    /// Operands are evaluated left to right, each at most once. Every
    /// comparison uses the previous right-hand value as its left side. The
    /// chain stops at the first comparison that is false, leaving the
    /// remaining operands unevaluated.
    ///
    /// # Parameters
    /// - `left`: The first operand.
    /// - `comparisons`: Operators paired with their right-hand operands.
    /// - `line`: Line number of the chain.
    ///
    /// # Returns
    /// `Value::Bool(true)` if every comparison holds.
    pub fn eval_compare(&mut self,
                        left: &Node,
                        comparisons: &[(BinaryOperator, Node)],
                        line: usize)
                        -> EvalResult<Value> {
        let mut current = self.eval_value(left)?;

        for (op, right) in comparisons {
            let next = self.eval_value(right)?;
            if !Self::eval_binary(*op, &current, &next, line)?.is_truthy() {
                return Ok(Value::Bool(false));
            }
            current = next;
        }

        Ok(Value::Bool(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_compare_exactly() {
        // Both round to the same f64.
        let a = Value::Integer(9_007_199_254_740_993);
        let b = Value::Integer(9_007_199_254_740_992);

        assert_eq!(Environment::eval_numeric_comparison(BinaryOperator::Greater, &a, &b, 1),
                   Ok(Value::Bool(true)));
    }

    #[test]
    fn nan_is_unordered() {
        let nan = Value::Float(f64::NAN);

        for (op, expected) in [(BinaryOperator::Equal, false),
                               (BinaryOperator::NotEqual, true),
                               (BinaryOperator::Less, false),
                               (BinaryOperator::GreaterEqual, false)]
        {
            assert_eq!(Environment::eval_numeric_comparison(op, &nan, &nan, 1),
                       Ok(Value::Bool(expected)));
        }
    }

    #[test]
    fn mixed_int_float_equality() {
        assert_eq!(Environment::eval_numeric_comparison(BinaryOperator::Equal,
                                                        &Value::Integer(2),
                                                        &Value::Float(2.0),
                                                        1),
                   Ok(Value::Bool(true)));
    }
}
