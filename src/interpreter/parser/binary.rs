use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            unary::{parse_primary, parse_unary},
        },
    },
};

/// Parses a chain of comparisons.
///
/// All comparison operators share one precedence level and chain: `a < b < c`
/// becomes a single `Node::Compare` holding both operators, meaning
/// `a < b and b < c`. Without any comparison operator the additive
/// expression is returned unchanged.
///
/// The rule is: `comparison := additive (("==" | "!=" | "<" | "<=" | ">" |
/// ">=") additive)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A `Node::Compare` or the plain additive expression.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let left = parse_additive(tokens)?;
    let mut comparisons = Vec::new();
    let mut line = left.line_number();

    while let Some(token) = tokens.peek().copied()
          && let Some(op) = token_to_binary_operator(token)
          && op.is_comparison()
    {
        tokens.next();
        if comparisons.is_empty() {
            line = token.line;
        }
        comparisons.push((op, parse_additive(tokens)?));
    }

    if comparisons.is_empty() {
        return Ok(left);
    }

    Ok(Node::Compare { left: Box::new(left),
                       comparisons,
                       line })
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A `Node::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_term(tokens)?;
    loop {
        if let Some(token) = tokens.peek().copied()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_term(tokens)?;
            left = Node::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: token.line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/`, `//` and `%`, so
/// `100 // 10 // 3` groups as `(100 // 10) // 3`.
///
/// The rule is: `term := unary (("*" | "/" | "//" | "%") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some(token) = tokens.peek().copied()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Mul
                       | BinaryOperator::Div
                       | BinaryOperator::FloorDiv
                       | BinaryOperator::Mod)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Node::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: token.line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation.
///
/// At most one `**` is consumed here. Its right operand is parsed at the
/// unary level, which allows `2 ** -1` and, because unary parsing comes back
/// to this function, still groups `2 ** 3 ** 2` as `2 ** (3 ** 2)`. The left
/// operand is a primary, so `-2 ** 2` is `-(2 ** 2)`.
///
/// The rule is: `power := primary ("**" unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation node or the primary expression.
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let base = parse_primary(tokens)?;

    if let Some(token) = tokens.peek().copied()
       && token.is_operator("**")
    {
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Node::BinaryOp { left:  Box::new(base),
                                   op:    BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   line:  token.line, });
    }

    Ok(base)
}

/// Converts a token to its corresponding binary operator, if possible.
///
/// # Parameters
/// - `token`: The token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token is an operator token with a binary
/// meaning, `None` otherwise.
#[must_use]
pub fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    if !matches!(token.kind, TokenKind::Operator) {
        return None;
    }
    BinaryOperator::from_symbol(token.text.as_str())
}
