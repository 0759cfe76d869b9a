use crate::error::CompileError;
use crate::schema::Table;

use super::{
    AttributeDefinition, Compiled, CreateTableRequest, KeySchemaElement, KeyType,
    ProvisionedThroughput,
};

pub(super) fn compile_create_table(table: &Table) -> Result<Compiled, CompileError> {
    let keys: Vec<_> = table.primary_key_columns().collect();

    match keys.len() {
        0 => {
            return Err(CompileError::NoPrimaryKey {
                table: table.name().to_string(),
            })
        }
        1 | 2 => {}
        count => {
            return Err(CompileError::TooManyPrimaryKeys {
                table: table.name().to_string(),
                count,
            })
        }
    }

    let key_types = [KeyType::Hash, KeyType::Range];

    let key_schema = keys
        .iter()
        .zip(key_types)
        .map(|(column, key_type)| KeySchemaElement {
            attribute_name: column.name.clone(),
            key_type,
        })
        .collect();

    // Only key attributes may appear in the attribute definitions.
    let attribute_definitions = keys
        .iter()
        .map(|column| AttributeDefinition {
            attribute_name: column.name.clone(),
            attribute_type: column.ty.key_attribute_type(),
        })
        .collect();

    Ok(Compiled::CreateTable(CreateTableRequest {
        table_name: table.name().to_string(),
        key_schema,
        attribute_definitions,
        provisioned_throughput: ProvisionedThroughput::default(),
    }))
}
