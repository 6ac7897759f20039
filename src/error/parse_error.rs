#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The token sequence stopped without a closing
    /// [`TokenKind::EndOfInput`](crate::interpreter::lexer::TokenKind::EndOfInput)
    /// token. Only hand-built token sequences can cause this; [`tokenize`]
    /// always appends one.
    ///
    /// [`tokenize`]: crate::interpreter::lexer::tokenize
    MissingEndOfInput,
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A structural token (`:`, NEWLINE, INDENT or DEDENT) was missing.
    Expected {
        /// What the parser was looking for.
        expected: &'static str,
        /// The construct after which it was expected.
        after:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of `=` was not a plain variable name.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number literal contained more than one decimal point.
    InvalidNumber {
        /// The literal text as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A literal value was too large to be represented safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The input ended before a string literal was closed.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A dedent did not return to any enclosing indentation level.
    InconsistentDedent {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after a statement should have completed.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// Gets the line number the error is attached to, if it has one.
    #[must_use]
    pub const fn line_number(&self) -> Option<usize> {
        match self {
            Self::MissingEndOfInput => None,
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ExpectedClosingParen { line }
            | Self::Expected { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::InvalidNumber { line, .. }
            | Self::LiteralTooLarge { line }
            | Self::UnterminatedString { line }
            | Self::InconsistentDedent { line }
            | Self::UnexpectedTrailingTokens { line, .. } => Some(*line),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::MissingEndOfInput => {
                write!(f, "Error: Token sequence is missing its end-of-input marker.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::Expected { expected,
                             after,
                             line, } => {
                write!(f, "Error on line {line}: Expected {expected} after {after}.")
            },

            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },

            Self::InvalidNumber { literal, line } => {
                write!(f, "Error on line {line}: Invalid number format: {literal}.")
            },

            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },

            Self::InconsistentDedent { line } => write!(f,
                                                        "Error on line {line}: Unindent does not match any outer indentation level."),

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after statement. Check your input: {token}"),
        }
    }
}

impl std::error::Error for ParseError {}
