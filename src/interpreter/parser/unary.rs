use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, LiteralValue, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_power,
            core::{ParseResult, parse_expression},
            utils::advance,
        },
    },
};

/// Parses a unary expression.
///
/// Prefix minus is right-recursive, so `--x` is `-(-x)`. It is desugared to
/// a subtraction from zero; there is no separate negation node.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | power
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// `BinaryOp(Literal(0), "-", operand)` or the power-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    if let Some(token) = tokens.peek().copied()
       && token.is_operator("-")
    {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Node::BinaryOp { left:  Box::new(Node::Literal { value: LiteralValue::Integer(0),
                                                                   line:  token.line, }),
                                   op:    BinaryOperator::Sub,
                                   right: Box::new(operand),
                                   line:  token.line, });
    }

    parse_power(tokens)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include
/// number, string and boolean literals, variable references and
/// parenthesized sub-expressions.
///
/// Grammar:
/// ```text
///     primary := NUMBER | STRING | BOOLEAN | IDENTIFIER
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Node`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let token = advance(tokens)?;
    let line = token.line;

    match token.kind {
        TokenKind::Number => Ok(Node::Literal { value: parse_number(&token.text, line)?,
                                                line }),
        TokenKind::String => Ok(Node::Literal { value: LiteralValue::Str(token.text.clone()),
                                                line }),
        TokenKind::Boolean => Ok(Node::Literal { value: LiteralValue::Bool(token.text == "True"),
                                                 line }),
        TokenKind::Identifier => Ok(Node::Variable { name: token.text.clone(),
                                                     line }),
        TokenKind::Operator if token.is_operator("(") => parse_grouping(tokens, line),
        TokenKind::EndOfInput => Err(ParseError::UnexpectedEndOfInput { line }),
        _ => Err(ParseError::UnexpectedToken { token: token.to_string(),
                                               line }),
    }
}

/// Parses the text of a number token.
///
/// Text without a decimal point is an integer; one decimal point makes a
/// float.
///
/// # Errors
/// - `ParseError::InvalidNumber` for more than one decimal point.
/// - `ParseError::LiteralTooLarge` for integers outside the `i64` range.
///
/// # Example
/// ```
/// use pyrite::{ast::LiteralValue, interpreter::parser::unary::parse_number};
///
/// assert_eq!(parse_number("42", 1).unwrap(), LiteralValue::Integer(42));
/// assert_eq!(parse_number("2.5", 1).unwrap(), LiteralValue::Float(2.5));
/// assert!(parse_number("1.2.3", 1).is_err());
/// ```
pub fn parse_number(text: &str, line: usize) -> ParseResult<LiteralValue> {
    match text.matches('.').count() {
        0 => text.parse::<i64>()
                 .map(LiteralValue::Integer)
                 .map_err(|_| ParseError::LiteralTooLarge { line }),
        1 => text.parse::<f64>()
                 .map(LiteralValue::Float)
                 .map_err(|_| ParseError::InvalidNumber { literal: text.to_string(),
                                                          line }),
        _ => Err(ParseError::InvalidNumber { literal: text.to_string(),
                                             line }),
    }
}

/// Parses a parenthesized expression.
///
/// The opening parenthesis has already been consumed. The inner expression
/// is parsed at the assignment level and returned as-is; grouping leaves no
/// trace in the tree.
///
/// # Errors
/// `ParseError::ExpectedClosingParen` if the expression is not followed by
/// `)`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let inner = parse_expression(tokens)?;

    match tokens.peek().copied() {
        Some(token) if token.is_operator(")") => {
            tokens.next();
            Ok(inner)
        },
        Some(token) => Err(ParseError::ExpectedClosingParen { line: token.line }),
        None => Err(ParseError::ExpectedClosingParen { line }),
    }
}
