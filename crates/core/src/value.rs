//! Scalar values exchanged with DynamoDB.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::DecodeError;

/// A decoded DynamoDB item, keyed by attribute name.
pub type Record = BTreeMap<String, Value>;

/// DynamoDB attribute type tags supported by sqla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeType {
    S,
    N,
    B,
    #[serde(rename = "BOOL")]
    Bool,
    #[serde(rename = "NULL")]
    Null,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::S => "S",
            AttributeType::N => "N",
            AttributeType::B => "B",
            AttributeType::Bool => "BOOL",
            AttributeType::Null => "NULL",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute value.
///
/// DynamoDB transports numbers as strings; they are decoded to `Integer` when
/// the text is an `i64` and to `Float` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Binary(Vec<u8>),
}

impl Value {
    /// The attribute type this value is stored as.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Value::Null => AttributeType::Null,
            Value::String(_) => AttributeType::S,
            Value::Integer(_) | Value::Float(_) => AttributeType::N,
            Value::Bool(_) => AttributeType::Bool,
            Value::Binary(_) => AttributeType::B,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// False for `NaN` and the infinities, which a DynamoDB number cannot hold.
    pub fn is_storable(&self) -> bool {
        !matches!(self, Value::Float(f) if !f.is_finite())
    }

    /// Parses the wire representation of a DynamoDB number.
    pub fn parse_number(text: &str) -> Result<Value, DecodeError> {
        let trimmed = text.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Value::Integer(i));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or_else(|| DecodeError::InvalidNumber(text.to_string()))
    }

    /// The wire representation of a numeric value, `None` for other kinds.
    pub fn number_text(&self) -> Option<String> {
        match self {
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
