use thiserror::Error;

/// Errors raised while building the schema model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Column '{column}' is defined more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },
    #[error("Table '{0}' is already registered in this metadata")]
    DuplicateTable(String),
}

/// Errors raised while lowering a statement into a DynamoDB request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("DynamoDB requires at least one primary key column: {table}")]
    NoPrimaryKey { table: String },
    #[error("DynamoDB only supports up to 2 primary key columns, table '{table}' has {count}")]
    TooManyPrimaryKeys { table: String, count: usize },
    #[error("Unknown column '{column}' for table '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("Missing value for key column '{column}' of table '{table}'")]
    MissingKey { table: String, column: String },
    #[error("Key column '{column}' expects attribute type {expected}, got {actual}")]
    KeyTypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },
    #[error("Key column '{column}' of table '{table}' cannot be updated")]
    KeyAssignment { table: String, column: String },
    #[error("Statement against '{table}' has nothing to write")]
    EmptyStatement { table: String },
    #[error("{statement} against '{table}' requires a WHERE clause")]
    MissingFilter {
        statement: &'static str,
        table: String,
    },
    #[error("{operator} against '{table}' has no operands")]
    EmptyList {
        operator: &'static str,
        table: String,
    },
    #[error("Number {0} cannot be stored in DynamoDB")]
    NonFiniteNumber(String),
}

/// Errors raised while decoding DynamoDB attribute values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Unsupported attribute type for '{name}': {kind}")]
    UnsupportedAttribute { name: String, kind: String },
}
