//! Provides the fluent `CREATE TABLE` specification.

use crate::{
    core::{
        data_type::CqlType,
        identifier::{IntoIdentifier, TableName},
    },
    error::SpecError,
    options::{table_option::TableOption, value::OptionValue},
    spec::column::{ColumnRole, ColumnSpecification, Ordering},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Describes a table to create: its name, columns in declaration order and
/// table options.
///
/// ```
/// use cql_model::{CqlType, CreateTableSpecification, Ordering, TableOption};
///
/// # fn main() -> Result<(), cql_model::SpecError> {
/// let table = CreateTableSpecification::create_table("person")?
///     .partition_key_column("id", CqlType::Ascii)?
///     .clustered_key_column_ordered("date_of_birth", CqlType::Date, Ordering::Descending)?
///     .column("name", CqlType::Ascii)?
///     .with(TableOption::GcGraceSeconds, 86400i64)?;
///
/// assert_eq!(table.partition_key_columns().count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTableSpecification {
    name: TableName,
    if_not_exists: bool,
    columns: Vec<ColumnSpecification>,
    options: BTreeMap<TableOption, OptionValue>,
}

impl CreateTableSpecification {
    /// Targets `name` in the session's current keyspace.
    pub fn create_table(name: impl IntoIdentifier) -> Result<Self, SpecError> {
        Ok(Self::for_table(TableName::new(name)?))
    }

    /// Targets `name` in `keyspace`.
    pub fn create_table_in(
        keyspace: impl IntoIdentifier,
        name: impl IntoIdentifier,
    ) -> Result<Self, SpecError> {
        Ok(Self::for_table(TableName::qualified(keyspace, name)?))
    }

    pub fn for_table(name: TableName) -> Self {
        Self {
            name,
            if_not_exists: false,
            columns: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn partition_key_column(
        self,
        name: impl IntoIdentifier,
        data_type: CqlType,
    ) -> Result<Self, SpecError> {
        self.add_column(name, data_type, ColumnRole::PartitionKey, None)
    }

    /// Adds an ascending clustering column.
    pub fn clustered_key_column(
        self,
        name: impl IntoIdentifier,
        data_type: CqlType,
    ) -> Result<Self, SpecError> {
        self.add_column(name, data_type, ColumnRole::ClusteringKey, Some(Ordering::Ascending))
    }

    pub fn clustered_key_column_ordered(
        self,
        name: impl IntoIdentifier,
        data_type: CqlType,
        ordering: Ordering,
    ) -> Result<Self, SpecError> {
        self.add_column(name, data_type, ColumnRole::ClusteringKey, Some(ordering))
    }

    pub fn column(self, name: impl IntoIdentifier, data_type: CqlType) -> Result<Self, SpecError> {
        self.add_column(name, data_type, ColumnRole::Regular, None)
    }

    pub fn static_column(
        self,
        name: impl IntoIdentifier,
        data_type: CqlType,
    ) -> Result<Self, SpecError> {
        self.add_column(name, data_type, ColumnRole::Static, None)
    }

    /// Records a value-less option such as `COMPACT STORAGE`.
    pub fn with_flag(self, option: TableOption) -> Result<Self, SpecError> {
        self.with(option, OptionValue::Flag)
    }

    /// Records a table option. The value is checked against the option's kind
    /// here, not when the statement is rendered. Recording an option twice
    /// keeps the last value.
    pub fn with(
        mut self,
        option: TableOption,
        value: impl Into<OptionValue>,
    ) -> Result<Self, SpecError> {
        let stored = option.accept(value.into())?;
        self.options.insert(option, stored);
        Ok(self)
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn columns(&self) -> &[ColumnSpecification] {
        &self.columns
    }

    pub fn partition_key_columns(&self) -> impl Iterator<Item = &ColumnSpecification> {
        self.columns.iter().filter(|c| c.is_partition_key())
    }

    pub fn clustering_key_columns(&self) -> impl Iterator<Item = &ColumnSpecification> {
        self.columns.iter().filter(|c| c.is_clustering_key())
    }

    pub fn options(&self) -> &BTreeMap<TableOption, OptionValue> {
        &self.options
    }

    fn add_column(
        mut self,
        name: impl IntoIdentifier,
        data_type: CqlType,
        role: ColumnRole,
        ordering: Option<Ordering>,
    ) -> Result<Self, SpecError> {
        let name = name.into_identifier()?;

        if self.columns.iter().any(|c| c.name == name) {
            return Err(SpecError::DuplicateColumn(name));
        }

        let is_key = matches!(role, ColumnRole::PartitionKey | ColumnRole::ClusteringKey);
        if is_key && !data_type.is_valid_key_type() {
            return Err(SpecError::InvalidKeyColumnType {
                column: name,
                data_type: data_type.to_string(),
            });
        }

        self.columns.push(ColumnSpecification {
            name,
            data_type,
            role,
            ordering,
        });
        Ok(self)
    }
}
