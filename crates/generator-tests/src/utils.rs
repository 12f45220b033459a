#![allow(dead_code)]

use cql_model::{CqlType, Ordering};
use cql_session::{MemorySession, OptionLiteral, Session, TableMetadata};

/// Reads a table back from the session, failing the test if it is missing.
pub async fn fetch_table(session: &MemorySession, keyspace: &str, table: &str) -> TableMetadata {
    let keyspace_meta = session
        .keyspace(keyspace)
        .await
        .unwrap_or_else(|| panic!("keyspace {keyspace} does not exist"));
    keyspace_meta
        .table(table)
        .cloned()
        .unwrap_or_else(|| panic!("table {keyspace}.{table} does not exist"))
}

pub async fn assert_table_exists(session: &MemorySession, keyspace: &str, table: &str, expected: bool) {
    let exists = session
        .keyspace(keyspace)
        .await
        .is_some_and(|ks| ks.table(table).is_some());
    assert_eq!(exists, expected, "existence of {keyspace}.{table}");
}

/// Asserts the key layout: partition key names, then clustering names with
/// their orderings.
pub fn assert_key_layout(
    table: &TableMetadata,
    partition: &[&str],
    clustering: &[(&str, Ordering)],
) {
    let actual_partition: Vec<&str> = table
        .partition_key()
        .iter()
        .map(|c| c.name.as_internal())
        .collect();
    assert_eq!(actual_partition, partition, "partition key of {}", table.name);

    let actual_clustering: Vec<(&str, Ordering)> = table
        .clustering_columns()
        .iter()
        .map(|c| (c.name.as_internal(), c.ordering.unwrap_or_default()))
        .collect();
    assert_eq!(actual_clustering, clustering, "clustering columns of {}", table.name);
}

pub fn assert_column(table: &TableMetadata, name: &str, data_type: CqlType) {
    let column = table
        .columns
        .iter()
        .find(|c| c.name.as_internal() == name)
        .unwrap_or_else(|| panic!("column {name} missing from {}", table.name));
    assert_eq!(column.data_type, data_type, "type of column {name}");
}

pub fn assert_option(table: &TableMetadata, name: &str, expected: OptionLiteral) {
    assert_eq!(table.option(name), Some(&expected), "option {name} of {}", table.name);
}
