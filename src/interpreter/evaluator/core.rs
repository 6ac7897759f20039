use std::collections::HashMap;

use tracing::trace;

use crate::{ast::Node, error::RuntimeError, interpreter::value::core::Value};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of evaluating one node.
///
/// `break` and `continue` travel up as signals until the nearest enclosing
/// loop handles them; they never pass through an expression. A signal
/// carries the value of the last statement executed before it, so the loop
/// can report it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Evaluation finished normally, with or without a value.
    Normal(Option<Value>),
    /// A `break` is unwinding to its loop.
    Break {
        /// Line of the `break` statement.
        line:  usize,
        /// Value of the last statement executed in the loop body.
        value: Option<Value>,
    },
    /// A `continue` is unwinding to its loop.
    Continue {
        /// Line of the `continue` statement.
        line:  usize,
        /// Value of the last statement executed in the loop body.
        value: Option<Value>,
    },
}

impl Flow {
    /// Fills in `last` as the signal's value if the signal does not carry
    /// one yet. Normal completion is returned unchanged.
    #[must_use]
    pub fn or_value(self, last: Option<Value>) -> Self {
        match self {
            Self::Break { line, value: None } => Self::Break { line, value: last },
            Self::Continue { line, value: None } => Self::Continue { line, value: last },
            flow => flow,
        }
    }
}

/// Stores the runtime state of one interpreter session.
///
/// This is a single flat namespace mapping variable names to values. Entries
/// are created or overwritten by assignment and are never removed.
///
/// ## Usage
///
/// `Environment` is created once per session and reused for every statement.
/// All evaluation methods (like `eval()` and `eval_statement()`) read and
/// write this state.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Returns `true` if no variable has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Evaluates a node and returns how evaluation finished.
    ///
    /// This is the main dispatch of the tree-walking evaluator. Expressions
    /// always finish with `Flow::Normal(Some(_))`; compound statements may
    /// finish without a value; `break` and `continue` produce their signals.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    ///
    /// # Returns
    /// The [`Flow`] describing the result.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by the node or its children.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Flow> {
        match node {
            Node::Literal { value, .. } => Ok(Flow::Normal(Some(value.into()))),
            Node::Variable { name, line } => {
                let value = self.get(name)
                                .cloned()
                                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                               line: *line, })?;
                Ok(Flow::Normal(Some(value)))
            },
            Node::Assignment { name, value, .. } => {
                // The store happens only after the right side evaluated
                // successfully.
                let value = self.eval_value(value)?;
                trace!(name = %name, value = %value, "assign");
                self.set(name.as_str(), value.clone());
                Ok(Flow::Normal(Some(value)))
            },
            Node::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                Self::eval_binary(*op, &left, &right, *line).map(|v| Flow::Normal(Some(v)))
            },
            Node::Compare { left,
                            comparisons,
                            line, } => {
                self.eval_compare(left, comparisons, *line)
                    .map(|v| Flow::Normal(Some(v)))
            },
            Node::If { condition,
                       body,
                       elifs,
                       else_body,
                       .. } => self.eval_if(condition, body, elifs, else_body.as_deref()),
            Node::While { condition,
                          body,
                          else_body,
                          .. } => self.eval_while(condition, body, else_body.as_deref()),
            Node::Break { line } => Ok(Flow::Break { line:  *line,
                                                     value: None, }),
            Node::Continue { line } => Ok(Flow::Continue { line:  *line,
                                                           value: None, }),
        }
    }

    /// Evaluates a node that must produce a value.
    ///
    /// # Errors
    /// - `RuntimeError::MissingValue` if the node finished without a value.
    /// - `RuntimeError::BreakOutsideLoop` / `ContinueOutsideLoop` if a loop
    ///   signal reached this point.
    pub fn eval_value(&mut self, node: &Node) -> EvalResult<Value> {
        match self.eval(node)? {
            Flow::Normal(Some(value)) => Ok(value),
            Flow::Normal(None) => Err(RuntimeError::MissingValue { line: node.line_number() }),
            Flow::Break { line, .. } => Err(RuntimeError::BreakOutsideLoop { line }),
            Flow::Continue { line, .. } => Err(RuntimeError::ContinueOutsideLoop { line }),
        }
    }

    /// Evaluates a top-level statement.
    ///
    /// A `break` or `continue` that reaches this level had no enclosing loop
    /// and is reported as an error.
    ///
    /// # Returns
    /// The statement's value, or `None` for statements that produce none.
    ///
    /// # Example
    /// ```
    /// use pyrite::{
    ///     interpreter::{
    ///         evaluator::core::Environment, lexer::tokenize, parser::core::Parser,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let tokens = tokenize("x = 2 * 21").unwrap();
    /// let node = Parser::new(&tokens).parse().unwrap().unwrap();
    /// let mut environment = Environment::new();
    ///
    /// let result = environment.eval_statement(&node).unwrap();
    ///
    /// assert_eq!(result, Some(Value::Integer(42)));
    /// assert_eq!(environment.get("x"), Some(&Value::Integer(42)));
    /// ```
    pub fn eval_statement(&mut self, node: &Node) -> EvalResult<Option<Value>> {
        match self.eval(node)? {
            Flow::Normal(value) => Ok(value),
            Flow::Break { line, .. } => Err(RuntimeError::BreakOutsideLoop { line }),
            Flow::Continue { line, .. } => Err(RuntimeError::ContinueOutsideLoop { line }),
        }
    }
}

impl Node {
    /// Evaluates this node as a top-level statement in `environment`.
    ///
    /// Shorthand for [`Environment::eval_statement`].
    pub fn evaluate(&self, environment: &mut Environment) -> EvalResult<Option<Value>> {
        environment.eval_statement(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, LiteralValue};

    fn literal(value: i64) -> Node {
        Node::Literal { value: LiteralValue::Integer(value),
                        line:  1, }
    }

    #[test]
    fn literal_evaluation_is_repeatable() {
        let mut environment = Environment::new();
        let node = literal(7);

        for _ in 0..3 {
            assert_eq!(environment.eval_statement(&node).unwrap(),
                       Some(Value::Integer(7)));
        }
        assert!(environment.is_empty());
    }

    #[test]
    fn failed_right_side_leaves_binding_untouched() {
        let mut environment = Environment::new();
        environment.set("x", Value::Integer(1));

        let node = Node::Assignment { name:  "x".to_string(),
                                      value: Box::new(Node::BinaryOp { left:  Box::new(literal(5)),
                                                                       op:    BinaryOperator::Div,
                                                                       right: Box::new(literal(0)),
                                                                       line:  1, }),
                                      line:  1, };

        assert_eq!(environment.eval_statement(&node),
                   Err(RuntimeError::DivisionByZero { line: 1 }));
        assert_eq!(environment.get("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn loop_signals_outside_loops_are_errors() {
        let mut environment = Environment::new();

        assert_eq!(environment.eval_statement(&Node::Break { line: 3 }),
                   Err(RuntimeError::BreakOutsideLoop { line: 3 }));
        assert_eq!(environment.eval_statement(&Node::Continue { line: 4 }),
                   Err(RuntimeError::ContinueOutsideLoop { line: 4 }));
    }

    #[test]
    fn undefined_variable_names_the_variable() {
        let mut environment = Environment::new();
        let node = Node::Variable { name: "ghost".to_string(),
                                    line: 2, };

        assert_eq!(environment.eval_statement(&node),
                   Err(RuntimeError::UnknownVariable { name: "ghost".to_string(),
                                                       line: 2, }));
    }
}
