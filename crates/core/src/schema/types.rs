use std::fmt;

use serde::Serialize;

/// Attribute types DynamoDB accepts for key attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarAttributeType {
    S,
    N,
    B,
}

impl ScalarAttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarAttributeType::S => "S",
            ScalarAttributeType::N => "N",
            ScalarAttributeType::B => "B",
        }
    }

    /// Parses a `S`/`N`/`B` tag, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "S" => Some(ScalarAttributeType::S),
            "N" => Some(ScalarAttributeType::N),
            "B" => Some(ScalarAttributeType::B),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarAttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Text,
    Integer,
    BigInteger,
    SmallInteger,
    Float,
    Numeric,
    Boolean,
    LargeBinary,
    Date,
    DateTime,
    Uuid,
}

/// Every column type paired with the attribute type it uses as a key.
///
/// Boolean keys are stored as `S`, and an insert must pass the key as the
/// string `"true"` or `"false"`. A `Value::Bool` key fails to compile with
/// `CompileError::KeyTypeMismatch`.
pub const KEY_ATTRIBUTE_TYPES: &[(ColumnType, ScalarAttributeType)] = &[
    (ColumnType::String, ScalarAttributeType::S),
    (ColumnType::Text, ScalarAttributeType::S),
    (ColumnType::Integer, ScalarAttributeType::N),
    (ColumnType::BigInteger, ScalarAttributeType::N),
    (ColumnType::SmallInteger, ScalarAttributeType::N),
    (ColumnType::Float, ScalarAttributeType::N),
    (ColumnType::Numeric, ScalarAttributeType::N),
    (ColumnType::Boolean, ScalarAttributeType::S),
    (ColumnType::LargeBinary, ScalarAttributeType::B),
    (ColumnType::Date, ScalarAttributeType::S),
    (ColumnType::DateTime, ScalarAttributeType::S),
    (ColumnType::Uuid, ScalarAttributeType::S),
];

impl ColumnType {
    /// Attribute type used when this column is part of the key schema.
    ///
    /// Types without a native key representation fall back to `S`.
    pub fn key_attribute_type(&self) -> ScalarAttributeType {
        match self {
            ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::SmallInteger
            | ColumnType::Float
            | ColumnType::Numeric => ScalarAttributeType::N,
            ColumnType::LargeBinary => ScalarAttributeType::B,
            _ => ScalarAttributeType::S,
        }
    }

    /// Column type reported for a reflected attribute definition.
    pub fn from_attribute_type(ty: ScalarAttributeType) -> Self {
        match ty {
            ScalarAttributeType::S => ColumnType::String,
            ScalarAttributeType::N => ColumnType::Float,
            ScalarAttributeType::B => ColumnType::LargeBinary,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::String => "VARCHAR",
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInteger => "BIGINT",
            ColumnType::SmallInteger => "SMALLINT",
            ColumnType::Float => "FLOAT",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::LargeBinary => "BLOB",
            ColumnType::Date => "DATE",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Uuid => "UUID",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
