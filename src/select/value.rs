//! Cell Values
//!
//! Primitive values for table rows, with a byte tag bitmask for coarse
//! type detection and a flat value-to-string conversion for display.

use crate::error::{Error, Result};

pub const IS_LIST: u8 = 0x00;
pub const IS_STRING: u8 = 0x01;
pub const IS_INT: u8 = 0x04;
pub const IS_FLOAT: u8 = 0x10;
pub const IS_BOOL: u8 = 0x20;
pub const IS_NONE: u8 = 0x40;
pub const IS_ANY: u8 = 0x7f;
pub const IS_TABLE: u8 = 0x80;

/// A primitive cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    None,
}

impl Value {
    /// Type tag bit for this value.
    pub fn tag(&self) -> u8 {
        match self {
            Value::Str(_) | Value::Bytes(_) => IS_STRING,
            Value::Int(_) => IS_INT,
            Value::Float(_) => IS_FLOAT,
            Value::Bool(_) => IS_BOOL,
            Value::None => IS_NONE,
        }
    }

    /// Display form for table rendering. Booleans render as a check mark
    /// or blank; missing values render blank; bytes must be valid UTF-8.
    pub fn render(&self) -> Result<String> {
        match self {
            Value::Str(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(format!("{f:.6}")),
            Value::Bool(true) => Ok("✓".to_string()),
            Value::Bool(false) => Ok(String::new()),
            Value::Bytes(b) => String::from_utf8(b.clone())
                .map_err(|_| Error::UnsupportedValue("non-UTF-8 byte string".to_string())),
            Value::None => Ok(String::new()),
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
