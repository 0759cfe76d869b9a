use serde::Serialize;

use crate::schema::ScalarAttributeType;
use crate::value::{Record, Value};

/// Role of an attribute in the key schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyType {
    #[serde(rename = "HASH")]
    Hash,
    #[serde(rename = "RANGE")]
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: ScalarAttributeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Default for ProvisionedThroughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 1,
            write_capacity_units: 1,
        }
    }
}

/// A CreateTable request, serialisable with the AWS field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableRequest {
    pub table_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub provisioned_throughput: ProvisionedThroughput,
}

/// A PartiQL statement ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteStatement {
    pub statement: String,
    pub parameters: Vec<Value>,
    pub limit: Option<i32>,
    /// Projection in output order, when the statement was built from a table.
    pub columns: Option<Vec<String>>,
    pub returns_rows: bool,
}

/// The output of the compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
    CreateTable(CreateTableRequest),
    DeleteTable { table_name: String },
    PutItem { table_name: String, item: Record },
    ExecuteStatement(ExecuteStatement),
}

impl Compiled {
    pub fn returns_rows(&self) -> bool {
        match self {
            Compiled::ExecuteStatement(exec) => exec.returns_rows,
            _ => false,
        }
    }

    /// Short name used in logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Compiled::CreateTable(_) => "CreateTable",
            Compiled::DeleteTable { .. } => "DeleteTable",
            Compiled::PutItem { .. } => "PutItem",
            Compiled::ExecuteStatement(_) => "ExecuteStatement",
        }
    }
}
