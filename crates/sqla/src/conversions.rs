//! DynamoDB attribute and request conversion functions.
//!
//! Pure functions between the SDK types and the `sqla_core` model. These are
//! testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{self as sdk, AttributeValue};
use sqla_core::compiler::{
    AttributeDefinition, CreateTableRequest, KeySchemaElement, KeyType, ProvisionedThroughput,
};
use sqla_core::error::DecodeError;
use sqla_core::reflect::{IndexDescription, TableDescription, TableStatus};
use sqla_core::schema::ScalarAttributeType;
use sqla_core::value::{Record, Value};

use crate::error::{Error, Result};

// ============================================================================
// Values
// ============================================================================

/// Convert a value to its attribute representation.
pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Integer(i) => AttributeValue::N(i.to_string()),
        Value::Float(f) => AttributeValue::N(f.to_string()),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Binary(bytes) => AttributeValue::B(Blob::new(bytes.clone())),
    }
}

/// Convert an attribute to a value. Sets, lists and maps are rejected.
pub fn from_attribute_value(
    name: &str,
    attribute: &AttributeValue,
) -> std::result::Result<Value, DecodeError> {
    let unsupported = |kind: &str| DecodeError::UnsupportedAttribute {
        name: name.to_string(),
        kind: kind.to_string(),
    };

    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => Value::parse_number(n),
        AttributeValue::B(blob) => Ok(Value::Binary(blob.as_ref().to_vec())),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Ss(_) => Err(unsupported("SS")),
        AttributeValue::Ns(_) => Err(unsupported("NS")),
        AttributeValue::Bs(_) => Err(unsupported("BS")),
        AttributeValue::L(_) => Err(unsupported("L")),
        AttributeValue::M(_) => Err(unsupported("M")),
        _ => Err(unsupported("UNKNOWN")),
    }
}

/// Convert a record to a DynamoDB item. Null values are left out.
pub fn dump(record: &Record) -> HashMap<String, AttributeValue> {
    record
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect()
}

/// Convert a DynamoDB item to a record.
pub fn load(item: &HashMap<String, AttributeValue>) -> std::result::Result<Record, DecodeError> {
    item.iter()
        .map(|(name, attribute)| Ok((name.clone(), from_attribute_value(name, attribute)?)))
        .collect()
}

// ============================================================================
// CreateTable
// ============================================================================

fn to_sdk_scalar_type(ty: ScalarAttributeType) -> sdk::ScalarAttributeType {
    match ty {
        ScalarAttributeType::S => sdk::ScalarAttributeType::S,
        ScalarAttributeType::N => sdk::ScalarAttributeType::N,
        ScalarAttributeType::B => sdk::ScalarAttributeType::B,
    }
}

fn to_sdk_key_type(key_type: KeyType) -> sdk::KeyType {
    match key_type {
        KeyType::Hash => sdk::KeyType::Hash,
        KeyType::Range => sdk::KeyType::Range,
    }
}

/// SDK inputs for a CreateTable call.
pub struct CreateTableInput {
    pub key_schema: Vec<sdk::KeySchemaElement>,
    pub attribute_definitions: Vec<sdk::AttributeDefinition>,
    pub provisioned_throughput: sdk::ProvisionedThroughput,
}

/// Convert a compiled CreateTable request into SDK builder output.
pub fn to_create_table_input(request: &CreateTableRequest) -> Result<CreateTableInput> {
    let key_schema = request
        .key_schema
        .iter()
        .map(|key| {
            sdk::KeySchemaElement::builder()
                .attribute_name(&key.attribute_name)
                .key_type(to_sdk_key_type(key.key_type))
                .build()
                .map_err(|e| Error::Sdk(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let attribute_definitions = request
        .attribute_definitions
        .iter()
        .map(|def| {
            sdk::AttributeDefinition::builder()
                .attribute_name(&def.attribute_name)
                .attribute_type(to_sdk_scalar_type(def.attribute_type))
                .build()
                .map_err(|e| Error::Sdk(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let ProvisionedThroughput {
        read_capacity_units,
        write_capacity_units,
    } = request.provisioned_throughput;
    let provisioned_throughput = sdk::ProvisionedThroughput::builder()
        .read_capacity_units(read_capacity_units)
        .write_capacity_units(write_capacity_units)
        .build()
        .map_err(|e| Error::Sdk(e.to_string()))?;

    Ok(CreateTableInput {
        key_schema,
        attribute_definitions,
        provisioned_throughput,
    })
}

// ============================================================================
// DescribeTable
// ============================================================================

fn from_sdk_key_schema(keys: &[sdk::KeySchemaElement]) -> Vec<KeySchemaElement> {
    keys.iter()
        .map(|key| KeySchemaElement {
            attribute_name: key.attribute_name().to_string(),
            key_type: match key.key_type() {
                sdk::KeyType::Hash => KeyType::Hash,
                _ => KeyType::Range,
            },
        })
        .collect()
}

/// Convert an SDK table description into the core reflection model.
pub fn from_sdk_table_description(
    table: &sdk::TableDescription,
) -> std::result::Result<TableDescription, DecodeError> {
    let attribute_definitions = table
        .attribute_definitions()
        .iter()
        .map(|def| {
            let kind = def.attribute_type().as_str();
            ScalarAttributeType::parse(kind)
                .map(|attribute_type| AttributeDefinition {
                    attribute_name: def.attribute_name().to_string(),
                    attribute_type,
                })
                .ok_or_else(|| DecodeError::UnsupportedAttribute {
                    name: def.attribute_name().to_string(),
                    kind: kind.to_string(),
                })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let global_secondary_indexes = table
        .global_secondary_indexes()
        .iter()
        .map(|index| IndexDescription {
            index_name: index.index_name().unwrap_or_default().to_string(),
            key_schema: from_sdk_key_schema(index.key_schema()),
        })
        .collect();

    let local_secondary_indexes = table
        .local_secondary_indexes()
        .iter()
        .map(|index| IndexDescription {
            index_name: index.index_name().unwrap_or_default().to_string(),
            key_schema: from_sdk_key_schema(index.key_schema()),
        })
        .collect();

    Ok(TableDescription {
        table_name: table.table_name().unwrap_or_default().to_string(),
        key_schema: from_sdk_key_schema(table.key_schema()),
        attribute_definitions,
        global_secondary_indexes,
        local_secondary_indexes,
        table_status: table.table_status().map(|s| TableStatus::parse(s.as_str())),
        item_count: table.item_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqla_core::compiler::{compile, Compiled};
    use sqla_core::schema::{Column, ColumnType, Table};
    use sqla_core::stmt::CreateTable;

    #[test]
    fn test_value_to_attribute() {
        assert_eq!(
            to_attribute_value(&Value::from("a")),
            AttributeValue::S("a".to_string())
        );
        assert_eq!(
            to_attribute_value(&Value::from(42)),
            AttributeValue::N("42".to_string())
        );
        assert_eq!(
            to_attribute_value(&Value::from(1.5)),
            AttributeValue::N("1.5".to_string())
        );
        assert_eq!(
            to_attribute_value(&Value::from(true)),
            AttributeValue::Bool(true)
        );
        assert_eq!(to_attribute_value(&Value::Null), AttributeValue::Null(true));
    }

    #[test]
    fn test_attribute_to_value() {
        assert_eq!(
            from_attribute_value("n", &AttributeValue::N("123".to_string())).unwrap(),
            Value::Integer(123)
        );
        assert_eq!(
            from_attribute_value("b", &AttributeValue::B(Blob::new(vec![1, 2]))).unwrap(),
            Value::Binary(vec![1, 2])
        );
        assert_eq!(
            from_attribute_value("x", &AttributeValue::Null(true)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_unsupported_attribute() {
        let err = from_attribute_value("tags", &AttributeValue::Ss(vec!["a".to_string()]))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedAttribute {
                name: "tags".to_string(),
                kind: "SS".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = from_attribute_value("n", &AttributeValue::N("abc".to_string())).unwrap_err();
        assert_eq!(err, DecodeError::InvalidNumber("abc".to_string()));
    }

    #[test]
    fn test_dump_and_load() {
        let mut record = Record::new();
        record.insert("id".to_string(), Value::from("1"));
        record.insert("age".to_string(), Value::from(30));
        record.insert("gone".to_string(), Value::Null);

        let item = dump(&record);
        assert_eq!(item.len(), 2);
        assert!(!item.contains_key("gone"));

        let loaded = load(&item).unwrap();
        assert_eq!(loaded.get("id"), Some(&Value::from("1")));
        assert_eq!(loaded.get("age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_create_table_input() {
        let table = Table::new(
            "events",
            [
                Column::new("id", ColumnType::String).primary_key(),
                Column::new("seq", ColumnType::Integer).primary_key(),
                Column::new("name", ColumnType::String),
            ],
        )
        .unwrap();
        let request = match compile(&CreateTable::new(&table).into()).unwrap() {
            Compiled::CreateTable(request) => request,
            other => panic!("unexpected {other:?}"),
        };

        let input = to_create_table_input(&request).unwrap();

        assert_eq!(input.key_schema.len(), 2);
        assert_eq!(input.key_schema[0].attribute_name(), "id");
        assert_eq!(input.key_schema[0].key_type(), &sdk::KeyType::Hash);
        assert_eq!(input.key_schema[1].key_type(), &sdk::KeyType::Range);
        assert_eq!(
            input.attribute_definitions[1].attribute_type(),
            &sdk::ScalarAttributeType::N
        );
        assert_eq!(input.provisioned_throughput.read_capacity_units(), 1);
        assert_eq!(input.provisioned_throughput.write_capacity_units(), 1);
    }

    #[test]
    fn test_from_sdk_table_description() {
        let table = sdk::TableDescription::builder()
            .table_name("TEST_TABLE")
            .key_schema(
                sdk::KeySchemaElement::builder()
                    .attribute_name("id")
                    .key_type(sdk::KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                sdk::AttributeDefinition::builder()
                    .attribute_name("id")
                    .attribute_type(sdk::ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .table_status(sdk::TableStatus::Active)
            .item_count(3)
            .build();

        let desc = from_sdk_table_description(&table).unwrap();

        assert_eq!(desc.table_name, "TEST_TABLE");
        assert_eq!(desc.key_schema[0].key_type, KeyType::Hash);
        assert_eq!(
            desc.attribute_definitions[0].attribute_type,
            ScalarAttributeType::S
        );
        assert_eq!(desc.table_status, Some(TableStatus::Active));
        assert_eq!(desc.item_count, Some(3));
        assert!(desc.global_secondary_indexes.is_empty());
    }
}
