use crate::{
    error::GeneratorError,
    generator::CqlStatement,
    renderer::{Render, Renderer, options::render_map},
};
use cql_model::{CreateKeyspaceSpecification, DropKeyspaceSpecification, Replication};

impl CqlStatement for CreateKeyspaceSpecification {
    fn validate(&self) -> Result<(), GeneratorError> {
        let invalid = |reason: &str| GeneratorError::InvalidKeyspaceDefinition {
            keyspace: self.name().clone(),
            reason: reason.to_string(),
        };

        match self.replication() {
            Replication::Simple { replication_factor } if *replication_factor == 0 => {
                Err(invalid("replication factor must be at least 1"))
            }
            Replication::NetworkTopology { datacenters } if datacenters.is_empty() => {
                Err(invalid("at least one datacenter is required"))
            }
            _ => Ok(()),
        }
    }

    fn kind(&self) -> &'static str {
        "CREATE KEYSPACE"
    }
}

impl Render for CreateKeyspaceSpecification {
    fn render(&self, r: &mut Renderer) -> Result<(), GeneratorError> {
        r.cql.push_str("CREATE KEYSPACE ");
        if self.is_if_not_exists() {
            r.cql.push_str("IF NOT EXISTS ");
        }
        r.cql.push_str(&r.dialect.quote_identifier(self.name()));

        let replication = self.replication();
        let class = r.dialect.quote_literal(replication.class_name());
        let mut entries = vec![("class", class)];
        match replication {
            Replication::Simple { replication_factor } => {
                entries.push(("replication_factor", replication_factor.to_string()));
            }
            Replication::NetworkTopology { datacenters } => {
                entries.extend(datacenters.iter().map(|(dc, n)| (dc.as_str(), n.to_string())));
            }
        }
        let map = render_map(r, entries.into_iter());

        r.cql.push_str(" WITH replication = ");
        r.cql.push_str(&map);

        if let Some(durable_writes) = self.durable_writes_setting() {
            r.cql.push_str(&format!(" AND durable_writes = {durable_writes}"));
        }

        Ok(())
    }
}

impl CqlStatement for DropKeyspaceSpecification {
    fn kind(&self) -> &'static str {
        "DROP KEYSPACE"
    }
}

impl Render for DropKeyspaceSpecification {
    fn render(&self, r: &mut Renderer) -> Result<(), GeneratorError> {
        r.cql.push_str("DROP KEYSPACE ");
        if self.is_if_exists() {
            r.cql.push_str("IF EXISTS ");
        }
        r.cql.push_str(&r.dialect.quote_identifier(self.name()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::GeneratorError, generator::to_cql};
    use cql_model::{CreateKeyspaceSpecification, DropKeyspaceSpecification};

    #[test]
    fn test_render_simple_keyspace() {
        let spec = CreateKeyspaceSpecification::create_keyspace("CqlGenerator_it").unwrap();
        assert_eq!(
            to_cql(&spec).unwrap(),
            "CREATE KEYSPACE cqlgenerator_it WITH replication = \
             {'class': 'SimpleStrategy', 'replication_factor': 1};"
        );
    }

    #[test]
    fn test_render_network_keyspace() {
        let spec = CreateKeyspaceSpecification::create_keyspace("shop")
            .unwrap()
            .if_not_exists()
            .with_network_replication("dc2", 2)
            .with_network_replication("dc1", 3)
            .durable_writes(false);

        assert_eq!(
            to_cql(&spec).unwrap(),
            "CREATE KEYSPACE IF NOT EXISTS shop WITH replication = \
             {'class': 'NetworkTopologyStrategy', 'dc1': 3, 'dc2': 2} AND durable_writes = false;"
        );
    }

    #[test]
    fn test_zero_replication_factor_is_rejected() {
        let spec = CreateKeyspaceSpecification::create_keyspace("shop")
            .unwrap()
            .with_simple_replication(0);
        assert!(matches!(
            to_cql(&spec),
            Err(GeneratorError::InvalidKeyspaceDefinition { .. })
        ));
    }

    #[test]
    fn test_render_drop_keyspace() {
        let spec = DropKeyspaceSpecification::drop_keyspace("shop")
            .unwrap()
            .if_exists();
        assert_eq!(to_cql(&spec).unwrap(), "DROP KEYSPACE IF EXISTS shop;");
    }
}
