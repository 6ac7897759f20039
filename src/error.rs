/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include malformed literals, unterminated strings,
/// inconsistent indentation, unexpected tokens and missing structural tokens
/// such as `:` or the block markers.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include undefined variables, division by zero, unsupported operand
/// combinations and loop control signals escaping to the top level.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Either kind of failure surfaced by one call into the interpreter.
///
/// A source block is fully parsed before anything is evaluated, so a
/// [`InterpreterError::Parse`] never leaves the environment modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    /// The source text could not be tokenized or parsed.
    Parse(ParseError),
    /// A statement failed while it was being evaluated.
    Runtime(RuntimeError),
}

impl From<ParseError> for InterpreterError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for InterpreterError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InterpreterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
