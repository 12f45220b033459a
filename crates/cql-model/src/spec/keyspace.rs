//! Keyspace creation and removal specifications.

use crate::{
    core::identifier::{CqlIdentifier, IntoIdentifier},
    error::SpecError,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Replica placement strategy of a keyspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Replication {
    Simple { replication_factor: u32 },
    NetworkTopology { datacenters: BTreeMap<String, u32> },
}

impl Replication {
    pub fn class_name(&self) -> &'static str {
        match self {
            Replication::Simple { .. } => "SimpleStrategy",
            Replication::NetworkTopology { .. } => "NetworkTopologyStrategy",
        }
    }
}

impl Default for Replication {
    fn default() -> Self {
        Replication::Simple {
            replication_factor: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateKeyspaceSpecification {
    name: CqlIdentifier,
    if_not_exists: bool,
    replication: Replication,
    durable_writes: Option<bool>,
}

impl CreateKeyspaceSpecification {
    /// Starts a keyspace with `SimpleStrategy` and a replication factor of 1.
    pub fn create_keyspace(name: impl IntoIdentifier) -> Result<Self, SpecError> {
        Ok(Self {
            name: name.into_identifier()?,
            if_not_exists: false,
            replication: Replication::default(),
            durable_writes: None,
        })
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn with_simple_replication(mut self, replication_factor: u32) -> Self {
        self.replication = Replication::Simple { replication_factor };
        self
    }

    /// Adds a datacenter to a `NetworkTopologyStrategy`, replacing any simple
    /// replication set before.
    pub fn with_network_replication(mut self, datacenter: &str, replication_factor: u32) -> Self {
        match &mut self.replication {
            Replication::NetworkTopology { datacenters } => {
                datacenters.insert(datacenter.to_string(), replication_factor);
            }
            Replication::Simple { .. } => {
                self.replication = Replication::NetworkTopology {
                    datacenters: BTreeMap::from([(datacenter.to_string(), replication_factor)]),
                };
            }
        }
        self
    }

    pub fn durable_writes(mut self, durable_writes: bool) -> Self {
        self.durable_writes = Some(durable_writes);
        self
    }

    pub fn name(&self) -> &CqlIdentifier {
        &self.name
    }

    pub fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn replication(&self) -> &Replication {
        &self.replication
    }

    pub fn durable_writes_setting(&self) -> Option<bool> {
        self.durable_writes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropKeyspaceSpecification {
    name: CqlIdentifier,
    if_exists: bool,
}

impl DropKeyspaceSpecification {
    pub fn drop_keyspace(name: impl IntoIdentifier) -> Result<Self, SpecError> {
        Ok(Self {
            name: name.into_identifier()?,
            if_exists: false,
        })
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn name(&self) -> &CqlIdentifier {
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
    fn test_defaults_to_simple_strategy() {
        let spec = CreateKeyspaceSpecification::create_keyspace("CqlGenerator_it").unwrap();

        assert_eq!(spec.name().as_internal(), "cqlgenerator_it");
        assert_eq!(
            spec.replication(),
            &Replication::Simple {
                replication_factor: 1
            }
        );
        assert_eq!(spec.durable_writes_setting(), None);
    }

    #[test]
    fn test_network_replication_accumulates_datacenters() {
        let spec = CreateKeyspaceSpecification::create_keyspace("shop")
            .unwrap()
            .with_network_replication("dc1", 3)
            .with_network_replication("dc2", 2)
            .durable_writes(false);

        let Replication::NetworkTopology { datacenters } = spec.replication() else {
            panic!("expected network topology replication");
        };
        assert_eq!(datacenters.len(), 2);
        assert_eq!(datacenters["dc2"], 2);
        assert_eq!(spec.durable_writes_setting(), Some(false));
    }

    #[test]
    fn test_drop_keyspace_builder() {
        let spec = DropKeyspaceSpecification::drop_keyspace("shop")
            .unwrap()
            .if_exists();
        assert!(spec.is_if_exists());
        assert!(DropKeyspaceSpecification::drop_keyspace("").is_err());
    }
}
