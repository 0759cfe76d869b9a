//! Reads a described DynamoDB table back into the schema model.
//!
//! The driver fills a [`TableDescription`] from a `DescribeTable` response;
//! everything here is pure.

use serde::Serialize;

use crate::compiler::{AttributeDefinition, KeySchemaElement, KeyType};
use crate::error::SchemaError;
use crate::schema::{Column, ColumnType, Table};

/// Lifecycle state of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Creating,
    Updating,
    Deleting,
    Active,
    Archiving,
    Archived,
    InaccessibleEncryptionCredentials,
    Unknown(String),
}

impl TableStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "CREATING" => TableStatus::Creating,
            "UPDATING" => TableStatus::Updating,
            "DELETING" => TableStatus::Deleting,
            "ACTIVE" => TableStatus::Active,
            "ARCHIVING" => TableStatus::Archiving,
            "ARCHIVED" => TableStatus::Archived,
            "INACCESSIBLE_ENCRYPTION_CREDENTIALS" => TableStatus::InaccessibleEncryptionCredentials,
            other => TableStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TableStatus::Creating => "CREATING",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
            TableStatus::Active => "ACTIVE",
            TableStatus::Archiving => "ARCHIVING",
            TableStatus::Archived => "ARCHIVED",
            TableStatus::InaccessibleEncryptionCredentials => "INACCESSIBLE_ENCRYPTION_CREDENTIALS",
            TableStatus::Unknown(other) => other,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TableStatus::Active)
    }
}

/// A secondary index as reported by DescribeTable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexDescription {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    pub table_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub global_secondary_indexes: Vec<IndexDescription>,
    pub local_secondary_indexes: Vec<IndexDescription>,
    pub table_status: Option<TableStatus>,
    pub item_count: Option<i64>,
}

impl TableDescription {
    fn is_key(&self, attribute_name: &str) -> bool {
        self.key_schema
            .iter()
            .any(|k| k.attribute_name == attribute_name)
    }

    /// Key attribute names, HASH first.
    pub fn key_names(&self) -> Vec<String> {
        let mut keys: Vec<&KeySchemaElement> = self.key_schema.iter().collect();
        keys.sort_by_key(|k| matches!(k.key_type, KeyType::Range));
        keys.into_iter().map(|k| k.attribute_name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub autoincrement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKeyConstraint {
    pub constrained_columns: Vec<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexInfo {
    pub name: String,
    pub column_names: Vec<String>,
    pub unique: bool,
}

/// DynamoDB has no foreign keys; the type exists so callers get a uniform
/// reflection surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyInfo {
    pub name: Option<String>,
    pub constrained_columns: Vec<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
}

pub const PRIMARY_KEY_NAME: &str = "pk";

/// One column per attribute definition.
pub fn columns(desc: &TableDescription) -> Vec<ColumnInfo> {
    desc.attribute_definitions
        .iter()
        .map(|def| ColumnInfo {
            name: def.attribute_name.clone(),
            ty: ColumnType::from_attribute_type(def.attribute_type)
                .name()
                .to_string(),
            nullable: !desc.is_key(&def.attribute_name),
            default: None,
            autoincrement: false,
        })
        .collect()
}

pub fn primary_key(desc: &TableDescription) -> PrimaryKeyConstraint {
    PrimaryKeyConstraint {
        constrained_columns: desc.key_names(),
        name: PRIMARY_KEY_NAME.to_string(),
    }
}

/// Global indexes first, then local ones.
pub fn indexes(desc: &TableDescription) -> Vec<IndexInfo> {
    desc.global_secondary_indexes
        .iter()
        .chain(&desc.local_secondary_indexes)
        .map(|index| IndexInfo {
            name: index.index_name.clone(),
            column_names: index
                .key_schema
                .iter()
                .map(|k| k.attribute_name.clone())
                .collect(),
            unique: false,
        })
        .collect()
}

pub fn foreign_keys(_desc: &TableDescription) -> Vec<ForeignKeyInfo> {
    Vec::new()
}

/// Builds a [`Table`] from a description. Key columns come first, HASH before
/// RANGE, so the result compiles back into the same key schema.
pub fn to_table(desc: &TableDescription) -> Result<Table, SchemaError> {
    let type_of = |name: &str| {
        desc.attribute_definitions
            .iter()
            .find(|def| def.attribute_name == name)
            .map(|def| ColumnType::from_attribute_type(def.attribute_type))
            .unwrap_or(ColumnType::String)
    };

    let keys = desc.key_names();
    let key_columns = keys
        .iter()
        .map(|name| Column::new(name.clone(), type_of(name)).primary_key());
    let other_columns = desc
        .attribute_definitions
        .iter()
        .filter(|def| !desc.is_key(&def.attribute_name))
        .map(|def| Column::new(def.attribute_name.clone(), type_of(&def.attribute_name)));

    Table::new(desc.table_name.clone(), key_columns.chain(other_columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, Compiled};
    use crate::schema::ScalarAttributeType;
    use crate::stmt::CreateTable;

    fn key(name: &str, key_type: KeyType) -> KeySchemaElement {
        KeySchemaElement {
            attribute_name: name.to_string(),
            key_type,
        }
    }

    fn attr(name: &str, attribute_type: ScalarAttributeType) -> AttributeDefinition {
        AttributeDefinition {
            attribute_name: name.to_string(),
            attribute_type,
        }
    }

    fn description() -> TableDescription {
        TableDescription {
            table_name: "events".to_string(),
            // DescribeTable may list RANGE before HASH.
            key_schema: vec![key("seq", KeyType::Range), key("id", KeyType::Hash)],
            attribute_definitions: vec![
                attr("id", ScalarAttributeType::S),
                attr("seq", ScalarAttributeType::N),
                attr("owner", ScalarAttributeType::S),
            ],
            global_secondary_indexes: vec![IndexDescription {
                index_name: "by_owner".to_string(),
                key_schema: vec![key("owner", KeyType::Hash)],
            }],
            local_secondary_indexes: vec![IndexDescription {
                index_name: "by_seq".to_string(),
                key_schema: vec![key("id", KeyType::Hash), key("seq", KeyType::Range)],
            }],
            table_status: Some(TableStatus::Active),
            item_count: Some(0),
        }
    }

    #[test]
    fn test_columns() {
        let columns = columns(&description());
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].ty, "VARCHAR");
        assert!(!columns[0].nullable);
        assert_eq!(columns[1].ty, "FLOAT");
        assert!(columns[2].nullable);
        assert!(columns.iter().all(|c| c.default.is_none()));
        assert!(columns.iter().all(|c| !c.autoincrement));
    }

    #[test]
    fn test_primary_key_hash_first() {
        let pk = primary_key(&description());
        assert_eq!(pk.name, "pk");
        assert_eq!(pk.constrained_columns, vec!["id", "seq"]);
    }

    #[test]
    fn test_indexes_global_then_local() {
        let indexes = indexes(&description());
        let names: Vec<_> = indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["by_owner", "by_seq"]);
        assert_eq!(indexes[1].column_names, vec!["id", "seq"]);
        assert!(indexes.iter().all(|i| !i.unique));
    }

    #[test]
    fn test_no_foreign_keys() {
        assert!(foreign_keys(&description()).is_empty());
    }

    #[test]
    fn test_to_table_round_trips_key_schema() {
        let table = to_table(&description()).unwrap();
        let keys: Vec<_> = table
            .primary_key_columns()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(keys, vec!["id", "seq"]);
        assert_eq!(table.get_column("seq").unwrap().ty, ColumnType::Float);

        match compile(&CreateTable::new(&table).into()).unwrap() {
            Compiled::CreateTable(request) => {
                assert_eq!(request.key_schema[0], key("id", KeyType::Hash));
                assert_eq!(request.key_schema[1], key("seq", KeyType::Range));
                assert_eq!(request.attribute_definitions.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_table_status_parse() {
        assert!(TableStatus::parse("ACTIVE").is_active());
        assert_eq!(TableStatus::parse("DELETING").as_str(), "DELETING");
        assert_eq!(
            TableStatus::parse("NEW_STATE"),
            TableStatus::Unknown("NEW_STATE".to_string())
        );
    }
}
