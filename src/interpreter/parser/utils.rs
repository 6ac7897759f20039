use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Consumes the next token if it is the operator `symbol`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected operator.
/// - `symbol`: The operator text, e.g. `":"`.
/// - `after`: The construct the operator must follow, used in the error.
///
/// # Errors
/// Returns `ParseError::Expected` naming the missing operator if the next
/// token is anything else. The offending token is left in the stream.
pub(in crate::interpreter::parser) fn expect_operator<'a, I>(tokens: &mut Peekable<I>,
                                                             symbol: &'static str,
                                                             after: &'static str)
                                                             -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(token) if token.is_operator(symbol) => advance(tokens),
        Some(token) => Err(ParseError::Expected { expected: symbol_name(symbol),
                                                  after,
                                                  line: token.line }),
        None => Err(ParseError::MissingEndOfInput),
    }
}

/// Consumes the next token if it has the given layout kind.
///
/// # Errors
/// Returns `ParseError::Expected` with `expected` as the description when the
/// next token is of a different kind.
pub(in crate::interpreter::parser) fn expect_kind<'a, I>(tokens: &mut Peekable<I>,
                                                         kind: TokenKind,
                                                         expected: &'static str,
                                                         after: &'static str)
                                                         -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(token) if token.kind == kind => advance(tokens),
        Some(token) => Err(ParseError::Expected { expected,
                                                  after,
                                                  line: token.line }),
        None => Err(ParseError::MissingEndOfInput),
    }
}

/// Takes the next token. Running past the end of the sequence means the
/// closing `EndOfInput` token was missing.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>)
                                                     -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next()
          .ok_or(ParseError::MissingEndOfInput)
}

/// Skips blank logical lines.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while tokens.next_if(|token| token.kind == TokenKind::Newline)
                .is_some()
    {}
}

fn symbol_name(symbol: &'static str) -> &'static str {
    match symbol {
        ":" => "':'",
        ")" => "')'",
        _ => symbol,
    }
}
