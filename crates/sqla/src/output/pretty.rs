//! Pretty output formatting.

use sqla_core::reflect::{self, TableDescription};
use sqla_core::result::{Description, Row};

/// Format table names for display.
pub fn format_table_names(names: &[String]) -> String {
    if names.is_empty() {
        return "No tables found.".to_string();
    }
    let mut output = format!("TABLES ({})\n", names.len());
    output.push_str(&"-".repeat(40));
    for name in names {
        output.push_str(&format!("\n{}", name));
    }
    output
}

/// Format a described table for display.
pub fn format_table_description(desc: &TableDescription) -> String {
    let status = desc
        .table_status
        .as_ref()
        .map(|s| s.as_str())
        .unwrap_or("UNKNOWN");
    let mut output = format!("{} [{}]", desc.table_name, status);

    if let Some(count) = desc.item_count {
        output.push_str(&format!("\n  Items: {}", count));
    }

    let pk = reflect::primary_key(desc);
    output.push_str(&format!(
        "\n  Primary key: {}",
        pk.constrained_columns.join(", ")
    ));

    output.push_str("\n  Columns:");
    for column in reflect::columns(desc) {
        let nullable = if column.nullable { "" } else { " NOT NULL" };
        output.push_str(&format!("\n    {} {}{}", column.name, column.ty, nullable));
    }

    let indexes = reflect::indexes(desc);
    if !indexes.is_empty() {
        output.push_str("\n  Indexes:");
        for index in indexes {
            output.push_str(&format!(
                "\n    {} ({})",
                index.name,
                index.column_names.join(", ")
            ));
        }
    }
    output
}

/// Format a result set as an aligned text table.
pub fn format_rows(description: &[Description], rows: &[Row]) -> String {
    if rows.is_empty() {
        return "No rows.".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.values().iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = description
        .iter()
        .enumerate()
        .map(|(i, d)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain(std::iter::once(d.name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = line(description.iter().map(|d| d.name.as_str()).collect());
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        output.push('\n');
        output.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    output.push_str(&format!(
        "\n({} row{})",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqla_core::result::process_records;
    use sqla_core::value::{Record, Value};

    #[test]
    fn test_format_table_names() {
        assert_eq!(format_table_names(&[]), "No tables found.");
        let output = format_table_names(&["a".to_string(), "b".to_string()]);
        assert!(output.starts_with("TABLES (2)"));
        assert!(output.ends_with("\na\nb"));
    }

    #[test]
    fn test_format_rows() {
        let records: Vec<Record> = vec![
            [("id".to_string(), Value::from("1")), ("name".to_string(), Value::from("John"))]
                .into_iter()
                .collect(),
            [("id".to_string(), Value::from("22"))].into_iter().collect(),
        ];
        let (rows, description) = process_records(records, None);

        let output = format_rows(&description, &rows);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "id | name");
        assert_eq!(lines[1], "---+-----");
        assert_eq!(lines[2], "1  | John");
        assert_eq!(lines[3], "22 | NULL");
        assert_eq!(lines[4], "(2 rows)");
    }

    #[test]
    fn test_format_no_rows() {
        assert_eq!(format_rows(&[], &[]), "No rows.");
    }
}
