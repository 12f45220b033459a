//! Defines the `Dialect` trait for engine-specific CQL syntax.

use cql_model::{CqlIdentifier, CqlType, TableName};

pub trait Dialect: Send + Sync {
    /// Renders an identifier, quoting it only when the engine would otherwise
    /// fold its case or read it as a keyword.
    fn quote_identifier(&self, ident: &CqlIdentifier) -> String;

    /// Renders a `keyspace.table` or bare `table` reference.
    fn render_table_name(&self, name: &TableName) -> String {
        match &name.keyspace {
            Some(keyspace) => format!(
                "{}.{}",
                self.quote_identifier(keyspace),
                self.quote_identifier(&name.table)
            ),
            None => self.quote_identifier(&name.table),
        }
    }

    /// Renders a column type, including nested collection syntax.
    fn render_data_type(&self, data_type: &CqlType) -> String;

    /// Renders a string literal.
    fn quote_literal(&self, value: &str) -> String;

    /// Returns the name of the dialect (e.g., "Cassandra").
    fn name(&self) -> String;
}

/// Apache Cassandra 4.x and compatible engines.
#[derive(Debug, Clone, Default)]
pub struct Cassandra;

impl Dialect for Cassandra {
    fn quote_identifier(&self, ident: &CqlIdentifier) -> String {
        ident.as_cql()
    }

    fn render_data_type(&self, data_type: &CqlType) -> String {
        data_type.cql_name().into_owned()
    }

    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn name(&self) -> String {
        "Cassandra".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_escape_single_quotes() {
        assert_eq!(Cassandra.quote_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_table_name_components_are_quoted_independently() {
        let name = TableName::qualified("shop", r#""Orders""#).unwrap();
        assert_eq!(Cassandra.render_table_name(&name), r#"shop."Orders""#);
    }
}
