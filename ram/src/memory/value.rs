//! Values held in memory cells

use serde::Serialize;
use std::fmt;

/// A nuPython value as stored in a memory cell.
///
/// Values are fully owned: a string payload is never shared between two
/// cells, or between a cell and a copy handed out by a read.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// 64-bit integer
    Int(i64),
    /// 64-bit floating point
    Real(f64),
    /// Owned text
    Str(String),
    /// Memory address of another cell
    Ptr(i64),
    /// Boolean with 0/1 semantics (any non-zero payload is true)
    Boolean(i64),
    /// No value; every unwritten cell holds this
    #[default]
    None,
}

impl Value {
    /// Type name used by the memory dump
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Str(_) => "str",
            Value::Ptr(_) => "ptr",
            Value::Boolean(_) => "boolean",
            Value::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ptr(&self) -> Option<i64> {
        match self {
            Value::Ptr(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b != 0),
            _ => None,
        }
    }

    /// Releases a copy returned by a read.
    ///
    /// Consuming `self` makes a second release of the same copy a compile
    /// error; dropping the copy has the same effect.
    pub fn release(self) {}
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x:.6}"),
            Value::Str(s) => write!(f, "'{s}'"),
            Value::Ptr(p) => write!(f, "{p}"),
            Value::Boolean(0) => write!(f, "False"),
            Value::Boolean(_) => write!(f, "True"),
            Value::None => write!(f, "None"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(i64::from(b))
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
