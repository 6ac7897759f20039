use std::{iter::Peekable, slice::Iter};

use tracing::debug;

use crate::{
    ast::{BinaryOperator, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_comparison, statement::parse_line, utils::skip_newlines},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A cursor over a token sequence that yields one top-level statement per
/// call.
///
/// The token slice must come from [`tokenize`](crate::interpreter::lexer::tokenize)
/// and therefore end with [`TokenKind::EndOfInput`].
pub struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens: tokens.iter().peekable() }
    }

    /// Parses the next top-level statement.
    ///
    /// Blank lines before the statement are skipped. A simple statement must
    /// be followed by the end of its line; compound statements end with their
    /// block.
    ///
    /// # Returns
    /// `Some(node)` for each statement, then `None` once only the end of
    /// input remains.
    ///
    /// # Errors
    /// Any `ParseError` raised while parsing the statement, including
    /// `UnexpectedTrailingTokens` when a line holds more than one statement.
    ///
    /// # Example
    /// ```
    /// use pyrite::interpreter::{lexer::tokenize, parser::core::Parser};
    ///
    /// let tokens = tokenize("x = 1\n\ny = x").unwrap();
    /// let mut parser = Parser::new(&tokens);
    ///
    /// assert_eq!(parser.parse().unwrap().unwrap().to_string(), "x = 1");
    /// assert_eq!(parser.parse().unwrap().unwrap().to_string(), "y = x");
    /// assert!(parser.parse().unwrap().is_none());
    /// ```
    pub fn parse(&mut self) -> ParseResult<Option<Node>> {
        skip_newlines(&mut self.tokens);

        match self.tokens.peek().copied() {
            None => Ok(None),
            Some(token) if token.kind == TokenKind::EndOfInput => Ok(None),
            Some(_) => parse_line(&mut self.tokens).map(Some),
        }
    }

    /// Parses every remaining statement.
    ///
    /// Stops at the first error; nothing parsed so far is returned in that
    /// case.
    pub fn parse_program(&mut self) -> ParseResult<Vec<Node>> {
        let mut statements = Vec::new();
        while let Some(statement) = self.parse()? {
            statements.push(statement);
        }
        debug!(count = statements.len(), "parsed program");
        Ok(statements)
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    parse_assignment(tokens)
}

/// Parses assignment and augmented assignment.
///
/// `=` is right-associative, so `a = b = 1` stores `1` in both names.
/// `x += e` and `x -= e` desugar to `x = x + e` and `x = x - e`.
///
/// Grammar:
/// ```text
///     assignment := comparison (("=" assignment) | (("+=" | "-=") comparison))?
/// ```
///
/// # Errors
/// `ParseError::InvalidAssignmentTarget` if the left side of an assignment
/// operator is anything but a bare variable.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token>
{
    let target = parse_comparison(tokens)?;

    let Some(token) = tokens.peek().copied() else {
        return Ok(target);
    };
    let augmented = if token.is_operator("=") {
        None
    } else if token.is_operator("+=") {
        Some(BinaryOperator::Add)
    } else if token.is_operator("-=") {
        Some(BinaryOperator::Sub)
    } else {
        return Ok(target);
    };
    tokens.next();

    let line = token.line;
    let Node::Variable { name, .. } = target else {
        return Err(ParseError::InvalidAssignmentTarget { line });
    };

    let value = match augmented {
        None => parse_assignment(tokens)?,
        Some(op) => {
            let right = parse_comparison(tokens)?;
            Node::BinaryOp { left: Box::new(Node::Variable { name: name.clone(),
                                                             line }),
                             op,
                             right: Box::new(right),
                             line }
        },
    };

    Ok(Node::Assignment { name,
                          value: Box::new(value),
                          line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse_all(source: &str) -> ParseResult<Vec<Node>> {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_program()
    }

    #[test]
    fn same_tokens_parse_to_equal_trees() {
        let source = "\
total = 0
i = 1
while i <= 10:
    if i % 2 == 0:
        total += i ** 2
    elif 1 < i < 5:
        continue
    else:
        total -= -i // 3
    i += 1
else:
    done = True";
        let tokens = tokenize(source).unwrap();

        let first = Parser::new(&tokens).parse_program().unwrap();
        let second = Parser::new(&tokens).parse_program().unwrap();

        assert_eq!(first, second);
        assert_eq!(first, parse_all(source).unwrap());
    }

    #[test]
    fn incomplete_last_line_reports_its_line() {
        assert_eq!(parse_all("x = 1\ny ="),
                   Err(ParseError::UnexpectedToken { token: "NEWLINE".to_string(),
                                                     line:  2, }));
    }

    #[test]
    fn unterminated_token_sequence_is_rejected() {
        let tokens = [Token::new(TokenKind::Identifier, "x", 1),
                      Token::new(TokenKind::Operator, "=", 1)];

        let result = Parser::new(&tokens).parse();

        assert_eq!(result, Err(ParseError::MissingEndOfInput));
        assert_eq!(ParseError::MissingEndOfInput.line_number(), None);
    }
}
