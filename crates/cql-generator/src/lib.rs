//! Renders `cql-model` specifications into CQL DDL statements.
//!
//! ```
//! use cql_generator::to_cql;
//! use cql_model::{CqlType, CreateTableSpecification};
//!
//! let table = CreateTableSpecification::create_table("person")
//!     .unwrap()
//!     .partition_key_column("id", CqlType::Ascii)
//!     .unwrap()
//!     .column("name", CqlType::Ascii)
//!     .unwrap();
//!
//! assert_eq!(
//!     to_cql(&table).unwrap(),
//!     "CREATE TABLE person (id ascii, name ascii, PRIMARY KEY (id));"
//! );
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod renderer;

pub use crate::{
    config::GeneratorConfig,
    dialect::{Cassandra, Dialect},
    error::GeneratorError,
    generator::{CqlGenerator, CqlStatement, to_cql},
};
