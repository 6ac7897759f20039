use logos::Logos;
use tracing::debug;

use crate::error::ParseError;

/// The category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Variable names such as `total` or `_tmp`.
    Identifier,
    /// Number literals, kept verbatim (`42`, `3.14`, or the malformed `1.2.3`).
    Number,
    /// String literal contents without the surrounding quotes.
    String,
    /// `True` or `False`.
    Boolean,
    /// A reserved word: `if`, `elif`, `else`, `while`, `break`, `continue`
    /// or `def`. `def` is reserved even though no statement uses it yet.
    Keyword,
    /// Operators and punctuation, one or two characters long.
    Operator,
    /// End of a logical line.
    Newline,
    /// Indentation increased relative to the enclosing block.
    Indent,
    /// Indentation returned to an enclosing level.
    Dedent,
    /// Always the last token of a sequence.
    EndOfInput,
}

/// A lexical token: its kind, its literal text, and the source line it starts
/// on. Tokens are produced once by [`tokenize`] and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token category.
    pub kind: TokenKind,
    /// The literal text. String tokens hold the unquoted contents; layout
    /// tokens hold an empty string (or `"\n"` for [`TokenKind::Newline`]).
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self { kind,
               text: text.into(),
               line }
    }

    /// Returns `true` if this is the operator `symbol`.
    #[must_use]
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    /// Returns `true` if this is the keyword `word`.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Indent => write!(f, "INDENT"),
            TokenKind::Dedent => write!(f, "DEDENT"),
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::String => write!(f, "'{}'", self.text),
            _ => write!(f, "\"{}\"", self.text),
        }
    }
}

/// Character-level tokens recognised by logos.
///
/// Layout (newlines, indentation) is reconstructed from [`RawToken::Newline`]
/// by [`tokenize`]; nothing here knows about blocks.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
enum RawToken {
    /// Digit runs with any number of dots. More than one dot is rejected by
    /// the parser, not here.
    #[regex(r"[0-9][0-9.]*")]
    Number,
    /// A closed string literal. Embedded newlines are allowed and counted.
    #[regex(r#""[^"]*""#, string_contents, allow_greedy = true)]
    #[regex(r"'[^']*'", string_contents, allow_greedy = true)]
    String(String),
    /// A quote that is never closed before the input ends.
    #[regex(r#""[^"]*"#, allow_greedy = true)]
    #[regex(r"'[^']*", allow_greedy = true)]
    UnterminatedString,
    /// `True` / `False`
    #[token("True")]
    #[token("False")]
    Boolean,
    /// Reserved words.
    #[token("if")]
    #[token("elif")]
    #[token("else")]
    #[token("while")]
    #[token("break")]
    #[token("continue")]
    #[token("def")]
    Keyword,
    /// Names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// Two-character operators, and any other single character standing
    /// alone.
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("+=")]
    #[token("-=")]
    #[token("//")]
    #[token("**")]
    #[regex(r#"[^ \t\f\r\n0-9a-zA-Z_#"']"#)]
    Operator,
    /// `# comments` run to the end of the line.
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// A line break followed by the next line's leading whitespace. Carries
    /// the width of that whitespace.
    #[regex(r"\n[ \t]*", |lex| {
        lex.extras.line += 1;
        lex.slice().len() - 1
    })]
    Newline(usize),
    /// Spaces, tabs and feeds inside a line.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Strips the quotes from a string literal and accounts for the newlines it
/// spans.
fn string_contents(lex: &mut logos::Lexer<RawToken>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();
    slice[1..slice.len() - 1].to_string()
}

/// Measures the leading whitespace of the first line, which has no preceding
/// [`RawToken::Newline`] to carry it.
fn leading_indent(source: &str) -> usize {
    source.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Turns the flat logos stream into logical lines with indentation markers.
struct Layout {
    tokens:         Vec<Token>,
    indent_stack:   Vec<usize>,
    /// Indentation of the line the next real token starts. Blank and
    /// comment-only lines overwrite it without ever reaching the stack.
    pending_indent: Option<usize>,
}

impl Layout {
    fn new(first_indent: usize) -> Self {
        Self { tokens:         Vec::new(),
               indent_stack:   vec![0],
               pending_indent: Some(first_indent), }
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, line: usize) {
        self.tokens.push(Token::new(kind, text, line));
    }

    /// Called before every real token: closes the previous logical line and
    /// emits any indentation change.
    fn begin_token(&mut self, line: usize) -> Result<(), ParseError> {
        let Some(width) = self.pending_indent.take() else {
            return Ok(());
        };

        if let Some(last) = self.tokens.last() {
            let newline_line = last.line;
            self.push(TokenKind::Newline, "\n", newline_line);
        }

        let top = self.indent_stack.last().copied().unwrap_or(0);
        if width > top {
            self.indent_stack.push(width);
            self.push(TokenKind::Indent, "", line);
        } else if width < top {
            while self.indent_stack.last().is_some_and(|&level| level > width) {
                self.indent_stack.pop();
                self.push(TokenKind::Dedent, "", line);
            }
            if self.indent_stack.last() != Some(&width) {
                return Err(ParseError::InconsistentDedent { line });
            }
        }

        Ok(())
    }

    /// Closes the last line and every block still open.
    fn finish(mut self, line: usize) -> Vec<Token> {
        if let Some(last) = self.tokens.last()
           && last.kind != TokenKind::Newline
        {
            let newline_line = last.line;
            self.push(TokenKind::Newline, "\n", newline_line);
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(TokenKind::Dedent, "", line);
        }
        self.push(TokenKind::EndOfInput, "", line);
        self.tokens
    }
}

/// Converts source text into an ordered sequence of tokens.
///
/// Whitespace inside a line and `#` comments are dropped. At the start of
/// every logical line the leading whitespace is compared against the
/// indentation stack: a deeper line emits [`TokenKind::Indent`], a shallower
/// one emits one [`TokenKind::Dedent`] per closed level. Blank and
/// comment-only lines are ignored entirely. The sequence always ends with the
/// pending dedents and a single [`TokenKind::EndOfInput`].
///
/// # Errors
/// - `ParseError::UnterminatedString` if a quote is never closed.
/// - `ParseError::InconsistentDedent` if a dedent lands between two open
///   levels.
/// - `ParseError::UnexpectedToken` for input logos cannot classify.
///
/// # Example
/// ```
/// use pyrite::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("if x:\n    y = 1\n").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Keyword,
///                 TokenKind::Identifier,
///                 TokenKind::Operator,
///                 TokenKind::Newline,
///                 TokenKind::Indent,
///                 TokenKind::Identifier,
///                 TokenKind::Operator,
///                 TokenKind::Number,
///                 TokenKind::Newline,
///                 TokenKind::Dedent,
///                 TokenKind::EndOfInput]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut layout = Layout::new(leading_indent(source));
    let mut lexer = RawToken::lexer_with_extras(source, LexerExtras { line: 1 });

    loop {
        let line = lexer.extras.line;
        let Some(raw) = lexer.next() else {
            break;
        };

        let (kind, text) = match raw {
            Ok(RawToken::Newline(width)) => {
                layout.pending_indent = Some(width);
                continue;
            },
            Ok(RawToken::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { line });
            },
            Ok(RawToken::String(contents)) => (TokenKind::String, contents),
            Ok(RawToken::Number) => (TokenKind::Number, lexer.slice().to_string()),
            Ok(RawToken::Boolean) => (TokenKind::Boolean, lexer.slice().to_string()),
            Ok(RawToken::Keyword) => (TokenKind::Keyword, lexer.slice().to_string()),
            Ok(RawToken::Identifier) => (TokenKind::Identifier, lexer.slice().to_string()),
            Ok(RawToken::Operator) => (TokenKind::Operator, lexer.slice().to_string()),
            Ok(RawToken::Comment | RawToken::Ignored) => continue,
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         line });
            },
        };

        layout.begin_token(line)?;
        layout.push(kind, text, line);
    }

    let tokens = layout.finish(lexer.extras.line);
    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::{
        Dedent, EndOfInput, Identifier, Indent, Keyword, Newline, Number, Operator, String,
    };

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    fn operators(source: &str) -> Vec<std::string::String> {
        tokenize(source).unwrap()
                        .into_iter()
                        .filter(|t| t.kind == Operator)
                        .map(|t| t.text)
                        .collect()
    }

    #[test]
    fn two_character_operators_are_single_tokens() {
        assert_eq!(operators("a ** b // c += d -= e == f != g <= h >= i"),
                   ["**", "//", "+=", "-=", "==", "!=", "<=", ">="]);
        assert_eq!(operators("a * b / c + d = e < f > g"),
                   ["*", "/", "+", "=", "<", ">"]);
        assert_eq!(operators("x=-1"), ["=", "-"]);
        assert_eq!(operators("2*-3"), ["*", "-"]);
    }

    #[test]
    fn trailing_dot_is_part_of_the_number() {
        let tokens = tokenize("1. + 2").unwrap();

        assert_eq!(tokens[0], Token::new(Number, "1.", 1));
        assert_eq!(tokens[1], Token::new(Operator, "+", 1));
    }

    #[test]
    fn multi_line_strings_advance_the_line() {
        let tokens = tokenize("s = 'a\nb'\nt = 1").unwrap();

        assert_eq!(tokens[2], Token::new(String, "a\nb", 1));
        assert_eq!(tokens[4], Token::new(Identifier, "t", 3));
    }

    #[test]
    fn open_blocks_are_closed_at_end_of_input() {
        assert_eq!(kinds("if a:\n    if b:\n        c"),
                   [Keyword, Identifier, Operator, Newline, Indent, Keyword, Identifier, Operator,
                    Newline, Indent, Identifier, Newline, Dedent, Dedent, EndOfInput]);
    }

    #[test]
    fn comment_lines_do_not_change_indentation() {
        let expected = [Keyword, Identifier, Operator, Newline, Indent, Identifier, Newline,
                        Identifier, Newline, Dedent, EndOfInput];

        assert_eq!(kinds("if a:\n    b\n        # deeper\n    c"), expected);
        assert_eq!(kinds("if a:\n    b\n# shallower\n    c"), expected);
        assert_eq!(kinds("if a:  # opens\n    b\n\n    c\n"), expected);
    }

    #[test]
    fn dedent_to_an_unknown_level_fails() {
        assert_eq!(tokenize("if a:\n        b\n    c"),
                   Err(ParseError::InconsistentDedent { line: 3 }));
    }

    #[test]
    fn unterminated_string_reports_its_line() {
        assert_eq!(tokenize("x = 1\ny = 'open"),
                   Err(ParseError::UnterminatedString { line: 2 }));
    }
}
