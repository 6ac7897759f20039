#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division, modulo or integer division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// No behavior is defined for the operator on these operand kinds.
    UnsupportedOperation {
        /// The operator symbol.
        op:    String,
        /// Kind name of the left operand.
        left:  &'static str,
        /// Kind name of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `break` was executed with no enclosing loop.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `continue` was executed with no enclosing loop.
    ContinueOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expected value was missing (e.g., a loop used as an operand).
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A float that is infinite or NaN was used where an integer was needed.
    NonFiniteValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric operand was required but a different kind was given.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl RuntimeError {
    /// Gets the line number the error is attached to.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::DivisionByZero { line }
            | Self::UnsupportedOperation { line, .. }
            | Self::BreakOutsideLoop { line }
            | Self::ContinueOutsideLoop { line }
            | Self::Overflow { line }
            | Self::MissingValue { line }
            | Self::NonFiniteValue { line }
            | Self::ExpectedNumber { line } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::UnsupportedOperation { op,
                                         left,
                                         right,
                                         line, } => write!(f,
                                                           "Error on line {line}: Unsupported operation: {left} {op} {right}."),
            Self::BreakOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'break' outside loop.")
            },
            Self::ContinueOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'continue' not properly in loop.")
            },
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::MissingValue { line } => write!(f, "Error on line {line}: Value missing."),
            Self::NonFiniteValue { line } => write!(f,
                                                    "Error on line {line}: Cannot convert an infinite or NaN float to an integer."),
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected a number."),
        }
    }
}

impl std::error::Error for RuntimeError {}
