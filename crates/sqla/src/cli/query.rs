//! `sqla query`.

use clap::Parser;
use sqla_core::stmt::RawStatement;
use sqla_core::value::Value;

#[derive(Debug, Parser)]
pub struct QueryCommand {
    /// PartiQL statement with `?` placeholders.
    pub statement: String,

    /// Positional parameter, repeat once per placeholder. Numbers, `true`,
    /// `false` and `null` are typed; wrap a value in double quotes to force a
    /// string.
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,

    /// Maximum number of rows to print.
    #[arg(long)]
    pub limit: Option<usize>,
}

impl QueryCommand {
    pub fn to_statement(&self) -> RawStatement {
        let mut raw = RawStatement::new(&self.statement);
        for param in &self.params {
            raw = raw.bind(parse_param(param));
        }
        raw
    }
}

/// Types a command-line parameter.
pub fn parse_param(text: &str) -> Value {
    if let Some(inner) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return Value::String(inner.to_string());
    }

    match text {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::parse_number(text).unwrap_or_else(|_| Value::String(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("12"), Value::Integer(12));
        assert_eq!(parse_param("1.5"), Value::Float(1.5));
        assert_eq!(parse_param("true"), Value::Bool(true));
        assert_eq!(parse_param("null"), Value::Null);
        assert_eq!(parse_param("John"), Value::from("John"));
        assert_eq!(parse_param(r#""12""#), Value::from("12"));
    }

    #[test]
    fn test_to_statement() {
        let cmd = QueryCommand {
            statement: r#"SELECT * FROM "t" WHERE "id" = ? AND "n" > ?"#.to_string(),
            params: vec!["a".to_string(), "3".to_string()],
            limit: None,
        };
        let raw = cmd.to_statement();
        assert_eq!(raw.params, vec![Value::from("a"), Value::Integer(3)]);
    }
}
