//! In-memory specifications of CQL schema statements.
//!
//! Specifications are built through consuming, fluent builders that validate
//! every recorded fact as early as possible. Rendering them to CQL text is the
//! job of the `cql-generator` crate.

pub mod core;
pub mod error;
pub mod options;
pub mod spec;

pub use crate::{
    core::{
        data_type::CqlType,
        identifier::{CqlIdentifier, IntoIdentifier, TableName},
    },
    error::SpecError,
    options::{
        table_option::{OptionKind, TableOption},
        value::OptionValue,
    },
    spec::{
        column::{ColumnRole, ColumnSpecification, Ordering},
        create_table::CreateTableSpecification,
        drop_table::DropTableSpecification,
        keyspace::{CreateKeyspaceSpecification, DropKeyspaceSpecification, Replication},
    },
};
