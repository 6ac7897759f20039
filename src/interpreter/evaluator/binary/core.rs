use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

/// The operand-kind pairs an operator can be defined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// Integer or float on both sides.
    Numeric,
    /// Two strings.
    Text,
    /// A string and an integer, in either order.
    TextAndInteger,
    /// Two booleans.
    Boolean,
}

impl Operands {
    /// Classifies an operand pair. Returns `None` for pairs no operator is
    /// defined on.
    #[must_use]
    pub const fn classify(left: &Value, right: &Value) -> Option<Self> {
        use Value::{Bool, Float, Integer, Str};

        match (left, right) {
            (Integer(_) | Float(_), Integer(_) | Float(_)) => Some(Self::Numeric),
            (Str(_), Str(_)) => Some(Self::Text),
            (Integer(_), Str(_)) | (Str(_), Integer(_)) => Some(Self::TextAndInteger),
            (Bool(_), Bool(_)) => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// Signature shared by all operator handlers.
pub type Handler = fn(BinaryOperator, &Value, &Value, usize) -> EvalResult<Value>;

/// One entry of the operator table.
pub struct OperatorRule {
    /// Operand kinds the rule applies to.
    pub operands:  Operands,
    /// Operators the rule implements.
    pub operators: &'static [BinaryOperator],
    /// Function computing the result.
    pub handler:   Handler,
}

const COMPARISONS: &[BinaryOperator] = &[BinaryOperator::Equal,
                                         BinaryOperator::NotEqual,
                                         BinaryOperator::Less,
                                         BinaryOperator::LessEqual,
                                         BinaryOperator::Greater,
                                         BinaryOperator::GreaterEqual];

/// Every defined `(operand kinds, operator)` combination and its handler.
///
/// A combination missing from this table is an unsupported operation.
pub const OPERATOR_TABLE: &[OperatorRule] =
    &[OperatorRule { operands:  Operands::Numeric,
                     operators: &[BinaryOperator::Add,
                                  BinaryOperator::Sub,
                                  BinaryOperator::Mul,
                                  BinaryOperator::Div,
                                  BinaryOperator::FloorDiv,
                                  BinaryOperator::Mod],
                     handler:   Environment::eval_arithmetic, },
      OperatorRule { operands:  Operands::Numeric,
                     operators: &[BinaryOperator::Pow],
                     handler:   Environment::eval_pow, },
      OperatorRule { operands:  Operands::Numeric,
                     operators: COMPARISONS,
                     handler:   Environment::eval_numeric_comparison, },
      OperatorRule { operands:  Operands::Text,
                     operators: &[BinaryOperator::Add],
                     handler:   Environment::eval_concat, },
      OperatorRule { operands:  Operands::Text,
                     operators: COMPARISONS,
                     handler:   Environment::eval_string_comparison, },
      OperatorRule { operands:  Operands::TextAndInteger,
                     operators: &[BinaryOperator::Mul],
                     handler:   Environment::eval_repeat, },
      OperatorRule { operands:  Operands::Boolean,
                     operators: &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                     handler:   Environment::eval_bool_equality, }];

/// Builds the error for an operator applied to operands it is not defined on.
pub(in crate::interpreter::evaluator) fn unsupported(op: BinaryOperator,
                                                     left: &Value,
                                                     right: &Value,
                                                     line: usize)
                                                     -> RuntimeError {
    RuntimeError::UnsupportedOperation { op: op.to_string(),
                                         left: left.type_name(),
                                         right: right.type_name(),
                                         line }
}

impl Environment {
    /// Evaluates a binary operation between two values.
    ///
    /// The operand pair is classified, then the first rule in
    /// [`OPERATOR_TABLE`] matching both the operand kinds and the operator
    /// computes the result.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Errors
    /// `RuntimeError::UnsupportedOperation` when no rule matches, plus any
    /// error raised by the handler.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    ///
    /// let result = Environment::eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let text = Value::from("a");
    /// assert!(Environment::eval_binary(BinaryOperator::Sub, &text, &right, 1).is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        let operands =
            Operands::classify(left, right).ok_or_else(|| unsupported(op, left, right, line))?;

        let rule = OPERATOR_TABLE.iter()
                                 .find(|rule| {
                                     rule.operands == operands && rule.operators.contains(&op)
                                 })
                                 .ok_or_else(|| unsupported(op, left, right, line))?;

        (rule.handler)(op, left, right, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_has_a_numeric_rule() {
        use BinaryOperator::{
            Add, Div, Equal, FloorDiv, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Pow, Sub,
        };

        for op in [Add, Sub, Mul, Div, FloorDiv, Mod, Pow, Equal, NotEqual, Less, LessEqual,
                   Greater, GreaterEqual]
        {
            assert!(OPERATOR_TABLE.iter()
                                  .any(|rule| rule.operands == Operands::Numeric
                                              && rule.operators.contains(&op)),
                    "no numeric rule for {op}");
        }
    }

    #[test]
    fn mixed_kinds_are_unsupported() {
        let err = Environment::eval_binary(BinaryOperator::Add,
                                           &Value::Integer(1),
                                           &Value::from("a"),
                                           4).unwrap_err();

        assert_eq!(err,
                   RuntimeError::UnsupportedOperation { op:    "+".to_string(),
                                                        left:  "int",
                                                        right: "str",
                                                        line:  4, });
    }

    #[test]
    fn booleans_only_support_equality() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);

        assert_eq!(Environment::eval_binary(BinaryOperator::NotEqual, &t, &f, 1).unwrap(),
                   Value::Bool(true));
        assert!(Environment::eval_binary(BinaryOperator::Less, &t, &f, 1).is_err());
        assert!(Environment::eval_binary(BinaryOperator::Add, &t, &f, 1).is_err());
    }

    #[test]
    fn float_string_repetition_is_unsupported() {
        assert!(Environment::eval_binary(BinaryOperator::Mul,
                                         &Value::Float(2.0),
                                         &Value::from("ab"),
                                         1).is_err());
    }
}
