use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{LiteralValue, Node},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64,
};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable once constructed. The composite kinds (lists,
/// dictionaries and functions) are reference-counted, so cloning a `Value`
/// duplicates a handle rather than the underlying container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A boolean value, produced by comparisons and `True` / `False`.
    Bool(bool),
    /// A string.
    Str(String),
    /// A shared, ordered sequence of values.
    List(Rc<Vec<Self>>),
    /// A shared mapping from string keys to values.
    Dict(Rc<HashMap<String, Self>>),
    /// A shared reference to a function body.
    Function(Rc<Node>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<HashMap<String, Self>> for Value {
    fn from(v: HashMap<String, Self>) -> Self {
        Self::Dict(Rc::new(v))
    }
}

impl From<LiteralValue> for Value {
    fn from(lit: LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => i.into(),
            LiteralValue::Float(n) => n.into(),
            LiteralValue::Bool(b) => b.into(),
            LiteralValue::Str(s) => s.into(),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        lit.clone().into()
    }
}

impl Value {
    /// The user-facing name of the value's kind, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Function(_) => "function",
        }
    }

    /// Returns whether the value counts as true in a condition.
    ///
    /// Zero numbers, `False`, and empty strings, lists and dictionaries are
    /// false. Everything else, functions included, is true.
    ///
    /// # Example
    /// ```
    /// use pyrite::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(3).is_truthy());
    /// assert!(!Value::Float(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![Value::Bool(false)]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Float(r) => *r != 0.0,
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Dict(entries) => !entries.is_empty(),
            Self::Function(_) => true,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Float` and `Value::Integer`. Integers are widened to
    /// the nearest float.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is a float or an integer.
    /// - `Err(RuntimeError::ExpectedNumber)`: If not numeric.
    ///
    /// # Example
    /// ```
    /// use pyrite::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// let real = x.as_real(42).unwrap();
    ///
    /// assert_eq!(real, 10.0);
    /// assert!(Value::from("10").as_real(42).is_err());
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Float(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64(*n)),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }
}

/// Renders the value the way the REPL prints it.
///
/// Floats always show a decimal point or an exponent, strings are single
/// quoted, and composite kinds print as placeholders.
///
/// # Example
/// ```
/// use pyrite::interpreter::value::core::Value;
///
/// assert_eq!(Value::Float(2.0).to_string(), "2.0");
/// assert_eq!(Value::Bool(true).to_string(), "True");
/// assert_eq!(Value::from("hi").to_string(), "'hi'");
/// assert_eq!(Value::from(vec![Value::Integer(1)]).to_string(), "[...]");
/// ```
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            // Debug formatting keeps the fractional part of whole floats.
            Self::Float(r) => write!(f, "{r:?}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::List(_) => write!(f, "[...]"),
            Self::Dict(_) => write!(f, "{{...}}"),
            Self::Function(_) => write!(f, "<function>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_render_round_trippable() {
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::Float(1e20).to_string(), "1e20");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
    }

    #[test]
    fn composites_share_their_contents() {
        let list = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
        let copy = list.clone();

        match (&list, &copy) {
            (Value::List(a), Value::List(b)) => assert!(Rc::ptr_eq(a, b)),
            _ => panic!("expected lists"),
        }
    }

    #[test]
    fn empty_composites_are_falsy() {
        assert!(!Value::from(Vec::new()).is_truthy());
        assert!(!Value::from(HashMap::new()).is_truthy());
        assert_eq!(Value::from(HashMap::new()).to_string(), "{...}");
    }

    #[test]
    fn functions_are_truthy() {
        let body = Node::Break { line: 1 };
        let function = Value::Function(Rc::new(body));

        assert!(function.is_truthy());
        assert_eq!(function.to_string(), "<function>");
        assert_eq!(function.type_name(), "function");
    }
}
