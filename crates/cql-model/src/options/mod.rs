pub mod rewrite;
pub mod table_option;
pub mod value;
