//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error(transparent)]
    Sqla(#[from] sqla::Error),

    #[error(transparent)]
    Schema(#[from] sqla::core::SchemaError),

    #[error(transparent)]
    Compile(#[from] sqla::core::CompileError),

    #[error("Compiling '{0}' did not produce a CreateTable request")]
    UnexpectedRequest(String),

    #[error("Table '{table_name}' exists with a different key schema; destroy it first")]
    KeyMismatch { table_name: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserCancelled,
}
