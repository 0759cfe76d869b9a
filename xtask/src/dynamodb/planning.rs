//! Pure functions for calculating deployment plans (Functional Core).

use sqla::core::compiler::{AttributeDefinition, CreateTableRequest, KeySchemaElement, KeyType};
use sqla::core::reflect::{TableDescription, TableStatus};

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { request: CreateTableRequest },
    /// Table exists with the expected key names, roles and types.
    NoChanges {
        table_name: String,
        status: Option<TableStatus>,
    },
    /// Table exists but its keys differ from the fixture in name, role or
    /// attribute type. Deploy never rewrites keys; the table has to be
    /// destroyed first.
    KeyMismatch {
        table_name: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Describes each key as `name ROLE TYPE`, HASH first.
fn key_signature(keys: &[KeySchemaElement], definitions: &[AttributeDefinition]) -> Vec<String> {
    let mut keys: Vec<&KeySchemaElement> = keys.iter().collect();
    keys.sort_by_key(|k| matches!(k.key_type, KeyType::Range));
    keys.into_iter()
        .map(|key| {
            let role = match key.key_type {
                KeyType::Hash => "HASH",
                KeyType::Range => "RANGE",
            };
            format!(
                "{} {} {}",
                key.attribute_name,
                role,
                attribute_type(definitions, &key.attribute_name)
            )
        })
        .collect()
}

fn attribute_type<'a>(definitions: &'a [AttributeDefinition], name: &str) -> &'a str {
    definitions
        .iter()
        .find(|d| d.attribute_name == name)
        .map(|d| d.attribute_type.as_str())
        .unwrap_or("?")
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(
    current: Option<&TableDescription>,
    desired: &CreateTableRequest,
) -> DeployPlan {
    match current {
        None => DeployPlan::CreateTable {
            request: desired.clone(),
        },
        Some(state) => {
            let expected = key_signature(&desired.key_schema, &desired.attribute_definitions);
            let actual = key_signature(&state.key_schema, &state.attribute_definitions);

            if expected == actual {
                DeployPlan::NoChanges {
                    table_name: desired.table_name.clone(),
                    status: state.table_status.clone(),
                }
            } else {
                DeployPlan::KeyMismatch {
                    table_name: desired.table_name.clone(),
                    expected,
                    actual,
                }
            }
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableDescription>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { request } => {
            let mut lines = vec![format!("+ Create table: {}", request.table_name)];
            for key in &request.key_schema {
                let ty = attribute_type(&request.attribute_definitions, &key.attribute_name);
                let role = match key.key_type {
                    KeyType::Hash => "Partition key",
                    KeyType::Range => "Sort key",
                };
                lines.push(format!("  {}: {} ({})", role, key.attribute_name, ty));
            }
            lines.push(format!(
                "  Throughput: {} RCU / {} WCU",
                request.provisioned_throughput.read_capacity_units,
                request.provisioned_throughput.write_capacity_units
            ));
            lines
        }
        DeployPlan::NoChanges { table_name, status } => {
            let status = status.as_ref().map(|s| s.as_str()).unwrap_or("UNKNOWN");
            vec![format!("= Table '{table_name}' is up to date ({status})")]
        }
        DeployPlan::KeyMismatch {
            table_name,
            expected,
            actual,
        } => vec![
            format!("~ Table '{}' has a different key schema", table_name),
            format!("  expected: {}", expected.join(", ")),
            format!("  actual:   {}", actual.join(", ")),
        ],
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => vec![format!("- Delete table: {}", table_name)],
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}
