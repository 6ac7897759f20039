use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_line,
            utils::{expect_kind, skip_newlines},
        },
    },
};

/// Parses an indented block.
///
/// A block follows the `:` of a compound statement. It consists of the end
/// of the header line, an indent, one or more statements and the dedent that
/// closes it.
///
/// Grammar: `block := NEWLINE INDENT statement+ DEDENT`
///
/// # Parameters
/// - `tokens`: Token stream positioned right after the `:`.
///
/// # Returns
/// The statements of the block, in order.
///
/// # Errors
/// `ParseError::Expected` naming the missing NEWLINE, INDENT or DEDENT.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token>
{
    expect_kind(tokens, TokenKind::Newline, "NEWLINE", "':'")?;
    expect_kind(tokens, TokenKind::Indent, "an indented block", "':'")?;

    let mut statements = Vec::new();

    loop {
        skip_newlines(tokens);

        match tokens.peek().copied() {
            Some(token) if token.kind == TokenKind::Dedent => {
                tokens.next();
                break;
            },
            Some(token) if token.kind == TokenKind::EndOfInput => {
                return Err(ParseError::Expected { expected: "DEDENT",
                                                  after:    "block",
                                                  line:     token.line, });
            },
            Some(_) => statements.push(parse_line(tokens)?),
            None => return Err(ParseError::MissingEndOfInput),
        }
    }

    Ok(statements)
}
