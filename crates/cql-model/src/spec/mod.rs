pub mod column;
pub mod create_table;
pub mod drop_table;
pub mod keyspace;
