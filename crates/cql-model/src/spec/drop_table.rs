use crate::{
    core::identifier::{IntoIdentifier, TableName},
    error::SpecError,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropTableSpecification {
    name: TableName,
    if_exists: bool,
}

impl DropTableSpecification {
    pub fn drop_table(name: impl IntoIdentifier) -> Result<Self, SpecError> {
        Ok(Self::for_table(TableName::new(name)?))
    }

    pub fn drop_table_in(
        keyspace: impl IntoIdentifier,
        name: impl IntoIdentifier,
    ) -> Result<Self, SpecError> {
        Ok(Self::for_table(TableName::qualified(keyspace, name)?))
    }

    pub fn for_table(name: TableName) -> Self {
        Self {
            name,
            if_exists: false,
        }
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn is_if_exists(&self) -> bool {
        self.if_exists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_table_builder() {
        let spec = DropTableSpecification::drop_table("person")
            .unwrap()
            .if_exists();

        assert!(spec.is_if_exists());
        assert_eq!(spec.name().table.as_internal(), "person");
    }
}
