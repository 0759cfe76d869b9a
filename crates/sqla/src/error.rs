//! Driver error types and AWS SDK error mapping.
//!
//! Each SDK operation gets a `map_*_error` function that turns its service
//! errors into [`Error`] variants callers can match on.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::execute_statement::ExecuteStatementError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use sqla_core::error::{CompileError, DecodeError, SchemaError};
use thiserror::Error;

/// Result type alias for the driver.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("Conditional check failed: {0}")]
    ConditionalCheckFailed(String),

    #[error("Throttled by DynamoDB, please retry: {0}")]
    Throttled(String),

    #[error("DynamoDB request failed: {0}")]
    Sdk(String),

    #[error("Connection is closed")]
    ConnectionClosed,

    #[error("Cursor is closed")]
    CursorClosed,

    #[error("Timed out after {waited_secs}s waiting for table '{table}' to {condition}")]
    Timeout {
        table: String,
        condition: &'static str,
        waited_secs: u64,
    },
}

/// Map a CreateTable SDK error.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
    table_name: &str,
) -> Error {
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => {
            Error::TableAlreadyExists(table_name.to_string())
        }
        CreateTableError::LimitExceededException(_) => {
            Error::Throttled("Too many concurrent table operations".to_string())
        }
        CreateTableError::InternalServerError(_) => {
            Error::Sdk("DynamoDB internal server error".to_string())
        }
        err => Error::Sdk(format!("CreateTable failed: {}", DisplayErrorContext(&err))),
    }
}

/// Map a DeleteTable SDK error.
pub fn map_delete_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteTableError, R>,
    table_name: &str,
) -> Error {
    match err.into_service_error() {
        DeleteTableError::ResourceNotFoundException(_) => {
            Error::TableNotFound(table_name.to_string())
        }
        DeleteTableError::ResourceInUseException(_) => {
            Error::Sdk(format!("Table '{table_name}' is in use"))
        }
        DeleteTableError::LimitExceededException(_) => {
            Error::Throttled("Too many concurrent table operations".to_string())
        }
        DeleteTableError::InternalServerError(_) => {
            Error::Sdk("DynamoDB internal server error".to_string())
        }
        err => Error::Sdk(format!("DeleteTable failed: {}", DisplayErrorContext(&err))),
    }
}

/// Map a PutItem SDK error.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> Error {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => Error::TableNotFound(table_name.to_string()),
        PutItemError::ConditionalCheckFailedException(_) => {
            Error::ConditionalCheckFailed(format!("PutItem on '{table_name}'"))
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            Error::Throttled("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            Error::Throttled("Request limit exceeded".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            Error::Sdk("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            Error::Sdk("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            Error::Sdk("DynamoDB internal server error".to_string())
        }
        err => Error::Sdk(format!("PutItem failed: {}", DisplayErrorContext(&err))),
    }
}

/// Map an ExecuteStatement SDK error.
pub fn map_execute_statement_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ExecuteStatementError, R>,
    statement: &str,
) -> Error {
    match err.into_service_error() {
        ExecuteStatementError::ResourceNotFoundException(e) => Error::TableNotFound(
            e.message()
                .map(String::from)
                .unwrap_or_else(|| statement.to_string()),
        ),
        ExecuteStatementError::ConditionalCheckFailedException(_) => {
            Error::ConditionalCheckFailed(statement.to_string())
        }
        ExecuteStatementError::DuplicateItemException(_) => {
            Error::ConditionalCheckFailed(format!("Duplicate item: {statement}"))
        }
        ExecuteStatementError::ProvisionedThroughputExceededException(_) => {
            Error::Throttled("Throughput exceeded".to_string())
        }
        ExecuteStatementError::RequestLimitExceeded(_) => {
            Error::Throttled("Request limit exceeded".to_string())
        }
        ExecuteStatementError::TransactionConflictException(_) => {
            Error::Sdk("Transaction conflict, please retry".to_string())
        }
        ExecuteStatementError::InternalServerError(_) => {
            Error::Sdk("DynamoDB internal server error".to_string())
        }
        err => Error::Sdk(format!(
            "ExecuteStatement failed for `{statement}`: {}",
            DisplayErrorContext(&err)
        )),
    }
}

/// Map a DescribeTable SDK error.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> Error {
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => {
            Error::TableNotFound(table_name.to_string())
        }
        DescribeTableError::InternalServerError(_) => {
            Error::Sdk("DynamoDB internal server error".to_string())
        }
        err => Error::Sdk(format!(
            "DescribeTable failed: {}",
            DisplayErrorContext(&err)
        )),
    }
}

/// Map a ListTables SDK error.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> Error {
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => {
            Error::Sdk("DynamoDB internal server error".to_string())
        }
        err => Error::Sdk(format!("ListTables failed: {}", DisplayErrorContext(&err))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_transparent() {
        let error: Error = CompileError::NoPrimaryKey {
            table: "t".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "DynamoDB requires at least one primary key column: t"
        );
    }

    #[test]
    fn test_timeout_display() {
        let error = Error::Timeout {
            table: "TEST_TABLE".to_string(),
            condition: "become active",
            waited_secs: 120,
        };
        assert_eq!(
            error.to_string(),
            "Timed out after 120s waiting for table 'TEST_TABLE' to become active"
        );
    }
}
