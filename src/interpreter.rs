/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree, evaluates expressions and statements,
/// performs arithmetic and comparison operations, manages variable state and
/// produces results. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every node kind against the session environment.
/// - Carries `break` and `continue` as explicit signals to the nearest loop.
/// - Reports runtime errors such as division by zero or unsupported
///   operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens for
/// numbers, strings, names, keywords and operators, plus the layout tokens
/// (newline, indent, dedent) that delimit statements and blocks. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, text and
///   source line.
/// - Tracks the indentation stack.
/// - Reports lexical errors such as unterminated strings.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs one AST node per top-level statement.
///
/// # Responsibilities
/// - Converts tokens into AST nodes following the operator precedence ladder.
/// - Parses indented blocks of `if` and `while` statements.
/// - Validates grammar, reporting errors with line information.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, numeric widening and rendering.
pub mod value;
