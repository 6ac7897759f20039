use tracing::trace;

use crate::{
    ast::Node,
    interpreter::evaluator::core::{Environment, EvalResult, Flow},
};

impl Environment {
    /// Evaluates a sequence of statements.
    ///
    /// Statements run in order. The first `break` or `continue` signal stops
    /// the block and is returned to the caller, carrying the value of the
    /// last statement that completed before it.
    ///
    /// # Returns
    /// `Flow::Normal` with the value of the last statement (`None` for an
    /// empty block), or the signal that interrupted the block.
    pub fn eval_block(&mut self, statements: &[Node]) -> EvalResult<Flow> {
        let mut last = None;

        for statement in statements {
            match self.eval(statement)? {
                Flow::Normal(value) => last = value,
                signal => return Ok(signal.or_value(last)),
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Evaluates an `if` statement.
    ///
    /// Conditions are tested in source order (`if` first, then each `elif`)
    /// using truthiness. The body of the first truthy branch runs; if none is
    /// truthy the `else` body runs when present. At most one branch is
    /// evaluated.
    ///
    /// # Parameters
    /// - `condition`: The `if` condition.
    /// - `body`: Statements of the `if` branch.
    /// - `elifs`: `elif` conditions with their bodies.
    /// - `else_body`: Statements of the `else` branch, if any.
    ///
    /// # Returns
    /// The flow of the branch that ran, or `Flow::Normal(None)` if none did.
    pub fn eval_if(&mut self,
                   condition: &Node,
                   body: &[Node],
                   elifs: &[(Node, Vec<Node>)],
                   else_body: Option<&[Node]>)
                   -> EvalResult<Flow> {
        if self.eval_value(condition)?.is_truthy() {
            return self.eval_block(body);
        }

        for (elif_condition, elif_body) in elifs {
            if self.eval_value(elif_condition)?.is_truthy() {
                return self.eval_block(elif_body);
            }
        }

        match else_body {
            Some(else_body) => self.eval_block(else_body),
            None => Ok(Flow::Normal(None)),
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is re-evaluated before every iteration. A `continue`
    /// abandons the rest of the current iteration; a `break` leaves the loop
    /// immediately and skips the `else` body. The `else` body runs only when
    /// the condition turns false. Signals raised inside the `else` body
    /// belong to an enclosing loop and are passed on.
    ///
    /// # Parameters
    /// - `condition`: Loop condition.
    /// - `body`: Loop body.
    /// - `else_body`: Statements run after normal termination, if any.
    ///
    /// # Returns
    /// The value of the last statement executed, or `Flow::Normal(None)` if
    /// nothing ran.
    ///
    /// # Example
    /// ```
    /// use pyrite::{evaluate, interpreter::value::core::Value};
    ///
    /// let source = "\
    /// i = 0
    /// while i < 10:
    ///     i += 1
    ///     if i == 4:
    ///         break
    /// else:
    ///     i = 100
    /// i";
    ///
    /// assert_eq!(evaluate(source).unwrap(), Some(Value::Integer(4)));
    /// ```
    pub fn eval_while(&mut self,
                      condition: &Node,
                      body: &[Node],
                      else_body: Option<&[Node]>)
                      -> EvalResult<Flow> {
        let mut last = None;

        while self.eval_value(condition)?.is_truthy() {
            match self.eval_block(body)? {
                Flow::Normal(value) => last = value,
                Flow::Continue { line, value } => {
                    trace!(line, "continue");
                    last = value;
                },
                Flow::Break { line, value } => {
                    trace!(line, "break");
                    return Ok(Flow::Normal(value));
                },
            }
        }

        if let Some(else_body) = else_body {
            match self.eval_block(else_body)? {
                Flow::Normal(value) => last = value,
                signal => return Ok(signal),
            }
        }

        Ok(Flow::Normal(last))
    }
}
