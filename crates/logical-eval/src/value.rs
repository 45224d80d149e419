//! Variable values and the store expressions are evaluated against.
//!
//! The store is supplied by the host application and is never modified during
//! evaluation. A variable holds either a single [`Scalar`] or an ordered
//! sequence of scalars; sequences take part in membership tests on `=`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean, rendered as `true` / `false`.
    Bool(bool),
    /// A whole number, kept exact.
    Integer(i64),
    /// A number.
    Number(f64),
    /// Free text.
    Text(String),
}

impl Scalar {
    /// Returns the numeric value of this scalar, if it has one.
    ///
    /// Numbers are numeric as-is. Text is numeric when, after trimming ASCII
    /// whitespace, it is made only of digits, signs, `.` and exponent markers
    /// and parses as a finite `f64`. Booleans are never numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Number(n) if n.is_finite() => Some(*n),
            Scalar::Number(_) | Scalar::Bool(_) => None,
            Scalar::Text(text) => parse_number(text),
        }
    }

    /// Returns the exact integer value, for integers and integer-looking text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            Scalar::Text(text) => parse_integer(text),
            Scalar::Number(_) | Scalar::Bool(_) => None,
        }
    }
}

/// Parses an optionally signed run of digits that fits in an `i64`.
pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = trimmed.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Parses numeric-looking text. `inf`, `nan` and hex literals are rejected.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// The value of a variable: one scalar or a sequence of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single value.
    Scalar(Scalar),
    /// An ordered sequence, used for membership tests.
    Sequence(Vec<Scalar>),
}

impl Value {
    /// Returns the string form used by text operators.
    ///
    /// Sequences render as their elements joined by `,`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Returns the scalar if this is not a sequence.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Sequence(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(scalar) => scalar.fmt(f),
            Value::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.into())
                }
            }
        )*
    };
}

value_from_scalar!(&str, String, f64, i64, bool, Scalar);

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// Read-only access to named variables.
///
/// Implemented for the standard maps; hosts with their own storage can
/// implement it directly.
pub trait VariableStore {
    /// Returns the value bound to `name`, or `None` when it is undefined.
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl VariableStore for HashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl VariableStore for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<S: VariableStore + ?Sized> VariableStore for &S {
    fn lookup(&self, name: &str) -> Option<&Value> {
        (**self).lookup(name)
    }
}
