use crate::{
    core::identifier::CqlIdentifier,
    options::table_option::{OptionKind, TableOption},
};
use thiserror::Error;

/// Errors raised while building a specification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// An identifier was empty or not valid CQL.
    #[error("Invalid identifier '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A column name was used twice in one table.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(CqlIdentifier),

    /// A key column was declared with a type that cannot be part of a primary key.
    #[error("Column {column} cannot be a key column of type {data_type}")]
    InvalidKeyColumnType { column: CqlIdentifier, data_type: String },

    /// The option value's kind does not match the option.
    #[error("Option {option} expects a {expected} value, got {found}")]
    IncompatibleOptionValue {
        option: TableOption,
        expected: OptionKind,
        found: &'static str,
    },

    /// The value has the right kind but is not acceptable for the option.
    #[error("Invalid value for option {option}: {reason}")]
    InvalidOptionValue { option: TableOption, reason: String },
}
