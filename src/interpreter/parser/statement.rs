use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::expect_operator,
        },
    },
};

/// Parses a single statement.
///
/// Statements starting with `if`, `while`, `break` or `continue` are
/// dispatched to their dedicated parsers. Everything else is an expression
/// statement, assignments included. The remaining keywords (`elif`, `else`,
/// `def`) cannot start a statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a statement.
///
/// # Returns
/// The parsed statement node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let Some(token) = tokens.peek().copied() else {
        return Err(ParseError::MissingEndOfInput);
    };

    if token.kind != TokenKind::Keyword {
        return parse_expression(tokens);
    }

    tokens.next();
    match token.text.as_str() {
        "if" => parse_if(tokens, token.line),
        "while" => parse_while(tokens, token.line),
        "break" => Ok(Node::Break { line: token.line }),
        "continue" => Ok(Node::Continue { line: token.line }),
        _ => Err(ParseError::UnexpectedToken { token: token.to_string(),
                                               line:  token.line, }),
    }
}

/// Parses a statement together with the end of its line.
///
/// Simple statements must be followed by a newline (or the end of input);
/// anything else left on the line is an error. Compound statements already
/// consumed their line endings as part of their blocks.
///
/// # Errors
/// `ParseError::UnexpectedTrailingTokens` if a simple statement is followed
/// by more tokens on the same line.
pub fn parse_line<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let statement = parse_statement(tokens)?;
    if statement.is_compound() {
        return Ok(statement);
    }

    match tokens.peek().copied() {
        Some(token) if token.kind == TokenKind::Newline => {
            tokens.next();
            Ok(statement)
        },
        Some(token) if token.kind == TokenKind::EndOfInput => Ok(statement),
        Some(token) => Err(ParseError::UnexpectedTrailingTokens { token: token.to_string(),
                                                                  line:  token.line, }),
        None => Ok(statement),
    }
}

/// Parses an `if` statement with any number of `elif` branches and an
/// optional `else`.
///
/// Syntax:
/// ```text
///     if <condition>:
///         <block>
///     elif <condition>:
///         <block>
///     else:
///         <block>
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// A `Node::If` holding every branch.
///
/// # Errors
/// - `Expected` if a `:` or any structural token of a block is missing.
/// - Propagates any errors from condition and body parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let condition = parse_expression(tokens)?;
    expect_operator(tokens, ":", "if condition")?;
    let body = parse_block(tokens)?;

    let mut elifs = Vec::new();
    while tokens.next_if(|token| token.is_keyword("elif")).is_some() {
        let elif_condition = parse_expression(tokens)?;
        expect_operator(tokens, ":", "elif condition")?;
        elifs.push((elif_condition, parse_block(tokens)?));
    }

    let else_body = parse_else(tokens)?;

    Ok(Node::If { condition: Box::new(condition),
                  body,
                  elifs,
                  else_body,
                  line })
}

/// Parses a `while` loop with an optional `else` block.
///
/// Syntax:
/// ```text
///     while <condition>:
///         <block>
///     else:
///         <block>
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `while` keyword.
/// - `line`: Line number of the `while` token.
///
/// # Returns
/// A `Node::While`.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let condition = parse_expression(tokens)?;
    expect_operator(tokens, ":", "while condition")?;
    let body = parse_block(tokens)?;
    let else_body = parse_else(tokens)?;

    Ok(Node::While { condition: Box::new(condition),
                     body,
                     else_body,
                     line })
}

fn parse_else<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Vec<Node>>>
    where I: Iterator<Item = &'a Token>
{
    if tokens.next_if(|token| token.is_keyword("else")).is_none() {
        return Ok(None);
    }
    expect_operator(tokens, ":", "else")?;
    parse_block(tokens).map(Some)
}
