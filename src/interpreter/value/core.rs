use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value in the interpreter.
///
/// Variables of both built-in types hold integers, since the language has no
/// real literals. Booleans only come from the `TRUE`/`FALSE` literals.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Value {
    /// A 64 bit signed integer.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
}

impl Default for Value {
    /// The value a declared variable holds before its first assignment.
    fn default() -> Self {
        Self::Integer(0)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl Value {
    /// Returns the integer, or an error if the value is a boolean.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(3).as_integer(1).unwrap(), 3);
    /// assert!(Value::Boolean(true).as_integer(1).is_err());
    /// ```
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Boolean(_) => Err(RuntimeError::ExpectedInteger { found: self.to_string(),
                                                                     line }),
        }
    }

    /// Whether a conditional takes its `THEN` branch for this value.
    ///
    /// Booleans are taken as they are; integers are true when non-zero.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(-1).is_truthy());
    /// assert!(!Value::Integer(0).is_truthy());
    /// assert!(!Value::Boolean(false).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Boolean(b) => *b,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(true) => write!(f, "TRUE"),
            Self::Boolean(false) => write!(f, "FALSE"),
        }
    }
}
