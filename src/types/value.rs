//! Typed scalar values and rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of values, positionally aligned with its table's column list.
pub type Row = Vec<Value>;

/// A typed scalar value.
///
/// Comparisons are only defined between compatible kinds: numeric with
/// numeric (Integer and Float cross-compare by numeric value), string with
/// string, boolean with boolean. Comparing incompatible kinds is a runtime
/// evaluation failure, never a silent false. See [`super::evaluator`] for
/// the comparison kernels and the Null semantics.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value is Integer or Float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl fmt::Display for Value {
    /// Renders the value as it appears in delimited output: Null as the
    /// empty string, strings unquoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

// Implement Debug by hand to keep error messages and test output short.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Integer(i) => write!(f, "Integer({i})"),
            Value::Float(v) => write!(f, "Float({v})"),
            Value::Str(s) => write!(f, "Str({s})"),
        }
    }
}
