//! Functional core of sqla: the schema and statement models, the compiler
//! that lowers statements into DynamoDB requests, result shaping and
//! reflection. Nothing in this crate performs I/O.

pub mod compiler;
pub mod error;
pub mod reflect;
pub mod result;
pub mod schema;
pub mod stmt;
pub mod value;

pub use compiler::{compile, Compiled};
pub use error::{CompileError, DecodeError, SchemaError};
pub use result::{process_records, Description, Row};
pub use schema::{Column, ColumnType, MetaData, ScalarAttributeType, Table};
pub use stmt::{col, delete, insert, lit, select, update, Expr, Statement};
pub use value::{AttributeType, Record, Value};
