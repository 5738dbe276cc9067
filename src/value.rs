//! Scalar values and their declared kinds.
//!
//! Every option declares a [`ValueKind`]; raw strings arriving from the file,
//! env, and CLI layers pass through [`ValueKind::coerce`] before they are
//! staged. Defaults skip coercion: they are constructed as [`Value`]s
//! directly and are expected to already be well-formed.

use std::fmt;

/// A resolved configuration value. The four scalar shapes the file format
/// round-trips.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// The declared type of an option: the "type function" applied to every
/// raw string from file, env, or CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Str,
    Int,
    Float,
    Bool,
}

impl ValueKind {
    /// Coerce a raw string into a typed [`Value`].
    ///
    /// Booleans accept `true`/`false` case-insensitively. Integers and
    /// floats parse from the trimmed string. `None` means the string does
    /// not conform; the caller wraps it into a coercion error naming the
    /// option and source layer.
    pub fn coerce(self, raw: &str) -> Option<Value> {
        match self {
            ValueKind::Str => Some(Value::Str(raw.to_string())),
            ValueKind::Int => raw.trim().parse::<i64>().ok().map(Value::Int),
            ValueKind::Float => raw.trim().parse::<f64>().ok().map(Value::Float),
            ValueKind::Bool => {
                if raw.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Str => "string",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
        };
        write!(f, "{name}")
    }
}
