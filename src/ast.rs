use std::{cmp::Ordering, fmt};

use crate::interpreter::value::core::Value;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: numbers, strings and booleans. The evaluator turns it into a
/// [`Value`] without any further computation.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A boolean literal value: `True` or `False`.
    Bool(bool),
    /// A string literal, without its quotes.
    Str(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}

/// An abstract syntax tree (AST) node.
///
/// The node set is closed: expressions and statements share one enum, and
/// every variant records the source line it was parsed from. Nodes own their
/// children exclusively and are never modified after the parser builds them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A constant value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Binds the result of an expression to a name.
    ///
    /// `x += e` and `x -= e` are represented as an assignment of
    /// `x + e` / `x - e`.
    Assignment {
        /// Target variable.
        name:  String,
        /// Expression producing the stored value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A chain of comparisons such as `a < b <= c`.
    ///
    /// Holds at least one `(operator, operand)` pair. The chain is true when
    /// every adjacent pair compares true.
    Compare {
        /// The first operand.
        left:        Box<Self>,
        /// Each comparison operator with its right-hand operand.
        comparisons: Vec<(BinaryOperator, Self)>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `if` / `elif` / `else` statement.
    If {
        /// Condition of the `if` branch.
        condition: Box<Self>,
        /// Statements run when `condition` is truthy.
        body:      Vec<Self>,
        /// `elif` branches in source order.
        elifs:     Vec<(Self, Vec<Self>)>,
        /// Statements of the `else` branch, if present.
        else_body: Option<Vec<Self>>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `while` loop with an optional `else` block.
    While {
        /// Loop condition, tested before every iteration.
        condition: Box<Self>,
        /// Loop body.
        body:      Vec<Self>,
        /// Run when the condition turns false without a `break`.
        else_body: Option<Vec<Self>>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `break`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue`
    Continue {
        /// Line number in the source code.
        line: usize,
    },
}

/// The kind of an AST node, without its payload.
///
/// Callers use it to decide how to present a statement's result; the REPL for
/// instance never echoes assignments or compound statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::Literal`]
    Literal,
    /// [`Node::Variable`]
    Variable,
    /// [`Node::Assignment`]
    Assignment,
    /// [`Node::BinaryOp`]
    BinaryOp,
    /// [`Node::Compare`]
    Compare,
    /// [`Node::If`]
    If,
    /// [`Node::While`]
    While,
    /// [`Node::Break`]
    Break,
    /// [`Node::Continue`]
    Continue,
}

impl Node {
    /// Returns the line number associated with this node.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::Assignment { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Compare { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Break { line }
            | Self::Continue { line } => *line,
        }
    }

    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Literal { .. } => NodeKind::Literal,
            Self::Variable { .. } => NodeKind::Variable,
            Self::Assignment { .. } => NodeKind::Assignment,
            Self::BinaryOp { .. } => NodeKind::BinaryOp,
            Self::Compare { .. } => NodeKind::Compare,
            Self::If { .. } => NodeKind::If,
            Self::While { .. } => NodeKind::While,
            Self::Break { .. } => NodeKind::Break,
            Self::Continue { .. } => NodeKind::Continue,
        }
    }

    /// Returns `true` for statements that end with an indented block.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::If { .. } | Self::While { .. })
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::Assignment { name, value, .. } => write!(f, "{name} = {value}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Compare { left,
                            comparisons,
                            .. } => {
                write!(f, "({left}")?;
                for (op, right) in comparisons {
                    write!(f, " {op} {right}")?;
                }
                write!(f, ")")
            },
            Self::If { condition,
                       body,
                       elifs,
                       else_body,
                       .. } => {
                write!(f, "if {condition}:")?;
                write_block(f, body, depth)?;
                for (elif_condition, elif_body) in elifs {
                    write!(f, "\n{}elif {elif_condition}:", indent(depth))?;
                    write_block(f, elif_body, depth)?;
                }
                if let Some(else_body) = else_body {
                    write!(f, "\n{}else:", indent(depth))?;
                    write_block(f, else_body, depth)?;
                }
                Ok(())
            },
            Self::While { condition,
                          body,
                          else_body,
                          .. } => {
                write!(f, "while {condition}:")?;
                write_block(f, body, depth)?;
                if let Some(else_body) = else_body {
                    write!(f, "\n{}else:", indent(depth))?;
                    write_block(f, else_body, depth)?;
                }
                Ok(())
            },
            Self::Break { .. } => write!(f, "break"),
            Self::Continue { .. } => write!(f, "continue"),
        }
    }
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn write_block(f: &mut fmt::Formatter<'_>, body: &[Node], depth: usize) -> fmt::Result {
    for statement in body {
        write!(f, "\n{}", indent(depth + 1))?;
        statement.fmt_indented(f, depth + 1)?;
    }
    Ok(())
}

/// Renders the node back as source-like text.
///
/// Binary operations and comparison chains are fully parenthesized, so the
/// output shows how the parser grouped the input.
///
/// # Example
/// ```
/// use pyrite::{interpreter::lexer::tokenize, interpreter::parser::core::Parser};
///
/// let tokens = tokenize("x = 1 + 2 * 3").unwrap();
/// let node = Parser::new(&tokens).parse().unwrap().unwrap();
///
/// assert_eq!(node.to_string(), "x = (1 + (2 * 3))");
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Binary operators, arithmetic and relational.
///
/// Relational operators only ever appear inside [`Node::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition `+`
    Add,
    /// Subtraction `-`
    Sub,
    /// Multiplication `*`
    Mul,
    /// Division `/`
    Div,
    /// Truncating integer division `//`
    FloorDiv,
    /// Truncating remainder `%`
    Mod,
    /// Exponentiation `**`
    Pow,
    /// Equality `==`
    Equal,
    /// Inequality `!=`
    NotEqual,
    /// Less than `<`
    Less,
    /// Less than or equal `<=`
    LessEqual,
    /// Greater than `>`
    Greater,
    /// Greater than or equal `>=`
    GreaterEqual,
}

impl BinaryOperator {
    /// Looks up an operator by its source symbol.
    ///
    /// # Example
    /// ```
    /// use pyrite::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("//"), Some(BinaryOperator::FloorDiv));
    /// assert_eq!(BinaryOperator::from_symbol("="), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "//" => Self::FloorDiv,
            "%" => Self::Mod,
            "**" => Self::Pow,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            _ => return None,
        })
    }

    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Returns `true` for `== != < <= > >=`.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::LessEqual
                 | Self::Greater
                 | Self::GreaterEqual)
    }

    /// Decides a relational operator from the ordering of its operands.
    ///
    /// `None` as the ordering means the operands are unordered (a NaN was
    /// involved): only `!=` holds then. Returns `None` for arithmetic
    /// operators.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use pyrite::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::LessEqual.holds_for(Some(Ordering::Equal)), Some(true));
    /// assert_eq!(BinaryOperator::Equal.holds_for(None), Some(false));
    /// assert_eq!(BinaryOperator::Add.holds_for(Some(Ordering::Less)), None);
    /// ```
    #[must_use]
    pub fn holds_for(self, ordering: Option<Ordering>) -> Option<bool> {
        Some(match self {
            Self::Equal => ordering == Some(Ordering::Equal),
            Self::NotEqual => ordering != Some(Ordering::Equal),
            Self::Less => ordering == Some(Ordering::Less),
            Self::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Self::Greater => ordering == Some(Ordering::Greater),
            Self::GreaterEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
