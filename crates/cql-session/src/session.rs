use crate::{
    ast::{CreateKeyspace, CreateTable, Statement},
    error::SessionError,
    metadata::{ColumnMetadata, KeyspaceMetadata, OptionLiteral, TableMetadata},
    parser,
};
use async_trait::async_trait;
use cql_model::{CqlIdentifier, OptionKind, OptionValue, Ordering, TableName, TableOption};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Executes schema statements and exposes the resulting schema.
#[async_trait]
pub trait Session: Send + Sync {
    async fn execute(&self, cql: &str) -> Result<(), SessionError>;

    async fn keyspace(&self, name: &str) -> Option<KeyspaceMetadata>;
}

#[derive(Debug, Default)]
struct Catalog {
    keyspaces: BTreeMap<CqlIdentifier, KeyspaceMetadata>,
    current: Option<CqlIdentifier>,
}

/// A session backed by an in-memory schema catalog.
///
/// It enforces the schema rules a cluster would apply to DDL, which makes it
/// a stand-in for a live node when checking generated statements.
#[derive(Debug, Default)]
pub struct MemorySession {
    catalog: RwLock<Catalog>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose current keyspace is `name`, creating it with
    /// simple replication.
    pub async fn with_keyspace(name: &str) -> Result<Self, SessionError> {
        let session = Self::new();
        session
            .execute(&format!(
                "CREATE KEYSPACE {name} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
            ))
            .await?;
        session.execute(&format!("USE {name}")).await?;
        Ok(session)
    }

    pub async fn current_keyspace(&self) -> Option<CqlIdentifier> {
        self.catalog.read().await.current.clone()
    }

    pub async fn table(&self, name: &TableName) -> Option<TableMetadata> {
        let catalog = self.catalog.read().await;
        let keyspace = name.keyspace.as_ref().or(catalog.current.as_ref())?;
        catalog
            .keyspaces
            .get(keyspace)?
            .tables
            .get(&name.table)
            .cloned()
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn execute(&self, cql: &str) -> Result<(), SessionError> {
        let statement = parser::parse(cql)?;
        debug!("Executing {}: {}", statement.kind(), cql);

        let mut catalog = self.catalog.write().await;
        match statement {
            Statement::CreateKeyspace(create) => catalog.create_keyspace(create),
            Statement::DropKeyspace { name, if_exists } => catalog.drop_keyspace(name, if_exists),
            Statement::CreateTable(create) => catalog.create_table(create),
            Statement::DropTable { name, if_exists } => catalog.drop_table(name, if_exists),
            Statement::Use(name) => {
                if !catalog.keyspaces.contains_key(&name) {
                    return Err(SessionError::NotFound(format!("Keyspace {name}")));
                }
                info!("Using keyspace {}", name);
                catalog.current = Some(name);
                Ok(())
            }
        }
    }

    async fn keyspace(&self, name: &str) -> Option<KeyspaceMetadata> {
        let ident = CqlIdentifier::from_cql(name).ok()?;
        self.catalog.read().await.keyspaces.get(&ident).cloned()
    }
}

impl Catalog {
    fn create_keyspace(&mut self, create: CreateKeyspace) -> Result<(), SessionError> {
        if self.keyspaces.contains_key(&create.name) {
            if create.if_not_exists {
                warn!("Keyspace {} already exists, skipping", create.name);
                return Ok(());
            }
            return Err(SessionError::AlreadyExists(format!("Keyspace {}", create.name)));
        }

        let mut replication = None;
        let mut durable_writes = true;
        for (name, value) in create.properties {
            match (name.as_str(), value) {
                ("replication", OptionLiteral::Map(map)) => replication = Some(map),
                ("durable_writes", OptionLiteral::Bool(b)) => durable_writes = b,
                (other, value) => {
                    return Err(invalid(format!(
                        "unsupported keyspace property {other} = {value:?}"
                    )));
                }
            }
        }

        let replication = replication.ok_or_else(|| invalid("missing replication".to_string()))?;
        check_replication(&replication)?;

        info!("Created keyspace {}", create.name);
        self.keyspaces.insert(
            create.name.clone(),
            KeyspaceMetadata {
                name: create.name,
                replication,
                durable_writes,
                tables: BTreeMap::new(),
            },
        );
        Ok(())
    }

    fn drop_keyspace(&mut self, name: CqlIdentifier, if_exists: bool) -> Result<(), SessionError> {
        if self.keyspaces.remove(&name).is_none() {
            if if_exists {
                return Ok(());
            }
            return Err(SessionError::NotFound(format!("Keyspace {name}")));
        }
        if self.current.as_ref() == Some(&name) {
            self.current = None;
        }
        info!("Dropped keyspace {}", name);
        Ok(())
    }

    fn create_table(&mut self, create: CreateTable) -> Result<(), SessionError> {
        let keyspace_name = self.resolve_keyspace(&create.name)?;
        let keyspace = self
            .keyspaces
            .get_mut(&keyspace_name)
            .ok_or_else(|| SessionError::NotFound(format!("Keyspace {keyspace_name}")))?;

        if keyspace.tables.contains_key(&create.name.table) {
            if create.if_not_exists {
                warn!("Table {} already exists, skipping", create.name);
                return Ok(());
            }
            return Err(SessionError::AlreadyExists(format!("Table {}", create.name)));
        }

        let table = build_table(keyspace_name, create)?;
        info!(
            "Created table {}.{} with {} columns",
            table.keyspace,
            table.name,
            table.columns.len()
        );
        keyspace.tables.insert(table.name.clone(), table);
        Ok(())
    }

    fn drop_table(&mut self, name: TableName, if_exists: bool) -> Result<(), SessionError> {
        let keyspace_name = self.resolve_keyspace(&name)?;
        let removed = self
            .keyspaces
            .get_mut(&keyspace_name)
            .and_then(|ks| ks.tables.remove(&name.table));

        match removed {
            Some(_) => {
                info!("Dropped table {}.{}", keyspace_name, name.table);
                Ok(())
            }
            None if if_exists => Ok(()),
            None => Err(SessionError::NotFound(format!("Table {name}"))),
        }
    }

    fn resolve_keyspace(&self, name: &TableName) -> Result<CqlIdentifier, SessionError> {
        name.keyspace
            .clone()
            .or_else(|| self.current.clone())
            .ok_or_else(|| invalid("no keyspace has been specified".to_string()))
    }
}

fn build_table(keyspace: CqlIdentifier, create: CreateTable) -> Result<TableMetadata, SessionError> {
    let mut seen = HashSet::new();
    for column in &create.columns {
        if !seen.insert(&column.name) {
            return Err(invalid(format!("multiple definitions of column {}", column.name)));
        }
    }

    let [primary_key] = create.primary_keys.as_slice() else {
        return Err(invalid(format!(
            "exactly one PRIMARY KEY is required, found {}",
            create.primary_keys.len()
        )));
    };
    if primary_key.partition_key.is_empty() {
        return Err(invalid("empty partition key".to_string()));
    }

    let mut key_names = HashSet::new();
    for name in primary_key
        .partition_key
        .iter()
        .chain(&primary_key.clustering_columns)
    {
        if !seen.contains(name) {
            return Err(invalid(format!("unknown key column {name}")));
        }
        if !key_names.insert(name) {
            return Err(invalid(format!("column {name} appears twice in PRIMARY KEY")));
        }
    }

    let clustering = &primary_key.clustering_columns;
    let order: Vec<(CqlIdentifier, Ordering)> = match create.clustering_order {
        Some(order) => {
            let named: Vec<&CqlIdentifier> = order.iter().map(|(name, _)| name).collect();
            if named != clustering.iter().collect::<Vec<_>>() {
                return Err(invalid(
                    "CLUSTERING ORDER BY must list the clustering columns in key order"
                        .to_string(),
                ));
            }
            order
        }
        None => clustering
            .iter()
            .map(|name| (name.clone(), Ordering::Ascending))
            .collect(),
    };

    let mut columns = Vec::with_capacity(create.columns.len());
    for column in create.columns {
        let is_key = key_names.contains(&column.name);
        if is_key && !column.data_type.is_valid_key_type() {
            return Err(invalid(format!(
                "invalid type {} for PRIMARY KEY column {}",
                column.data_type, column.name
            )));
        }
        if column.is_static && (is_key || clustering.is_empty()) {
            return Err(invalid(format!(
                "static column {} requires clustering columns and cannot be part of the key",
                column.name
            )));
        }
        let ordering = order
            .iter()
            .find(|(name, _)| name == &column.name)
            .map(|(_, ordering)| *ordering);
        columns.push(ColumnMetadata {
            name: column.name,
            data_type: column.data_type,
            is_static: column.is_static,
            ordering,
        });
    }

    if create.compact_storage {
        check_compact_storage(&columns, &key_names, clustering.is_empty())?;
    }

    let mut options = BTreeMap::new();
    for (name, literal) in create.properties {
        let option = TableOption::from_cql_name(&name)
            .filter(|option| option.kind() != OptionKind::Flag)
            .ok_or_else(|| invalid(format!("unknown property '{name}'")))?;
        if options.contains_key(option.cql_name()) {
            return Err(SessionError::Syntax(format!("multiple definitions for property '{name}'")));
        }
        options.insert(option.cql_name().to_string(), accept_literal(option, literal)?);
    }

    Ok(TableMetadata {
        keyspace,
        name: create.name.table,
        columns,
        partition_key: primary_key.partition_key.clone(),
        clustering_columns: clustering.clone(),
        compact_storage: create.compact_storage,
        options,
    })
}

/// Compact tables have no static or non-frozen collection columns, and with
/// clustering columns at most one column outside the primary key.
fn check_compact_storage(
    columns: &[ColumnMetadata],
    key_names: &HashSet<&CqlIdentifier>,
    no_clustering: bool,
) -> Result<(), SessionError> {
    if let Some(column) = columns.iter().find(|c| c.is_static) {
        return Err(invalid(format!(
            "static column {} is not supported with COMPACT STORAGE",
            column.name
        )));
    }
    if let Some(column) = columns.iter().find(|c| c.data_type.is_collection()) {
        return Err(invalid(format!(
            "non-frozen collection {} is not supported with COMPACT STORAGE",
            column.name
        )));
    }
    if no_clustering {
        return Ok(());
    }

    let regular = columns
        .iter()
        .filter(|c| !key_names.contains(&c.name))
        .count();
    if regular > 1 {
        return Err(invalid(format!(
            "COMPACT STORAGE with clustering columns allows at most one column outside the PRIMARY KEY, got {regular}"
        )));
    }
    Ok(())
}

/// Validates a property literal and returns it the way the schema reports it.
fn accept_literal(option: TableOption, literal: OptionLiteral) -> Result<OptionLiteral, SessionError> {
    let value = match &literal {
        OptionLiteral::Int(n) => OptionValue::Integer(*n),
        OptionLiteral::Float(f) => OptionValue::Float(*f),
        OptionLiteral::Bool(b) => OptionValue::Boolean(*b),
        OptionLiteral::Text(text) => OptionValue::Text(text.clone()),
        OptionLiteral::Map(map) => OptionValue::map(
            map.iter()
                .map(|(k, v)| (k.clone(), literal_text(v))),
        ),
    };

    let stored = option
        .accept(value)
        .map_err(|e| invalid(e.to_string()))?;

    Ok(match stored {
        OptionValue::Float(f) => OptionLiteral::Float(f),
        OptionValue::Text(text) => OptionLiteral::Text(
            option.rewrite(&text).map_err(|e| invalid(e.to_string()))?,
        ),
        _ => literal,
    })
}

fn literal_text(literal: &OptionLiteral) -> String {
    match literal {
        OptionLiteral::Int(n) => n.to_string(),
        OptionLiteral::Float(f) => f.to_string(),
        OptionLiteral::Bool(b) => b.to_string(),
        OptionLiteral::Text(text) => text.clone(),
        OptionLiteral::Map(map) => format!("{map:?}"),
    }
}

fn check_replication(replication: &BTreeMap<String, OptionLiteral>) -> Result<(), SessionError> {
    let class = replication
        .get("class")
        .and_then(OptionLiteral::as_text)
        .ok_or_else(|| invalid("replication class is required".to_string()))?;

    let factors = replication.iter().filter(|(key, _)| key.as_str() != "class");
    let mut count = 0;
    for (key, value) in factors {
        let factor = match value {
            OptionLiteral::Int(n) => *n,
            OptionLiteral::Text(text) => text
                .parse()
                .map_err(|_| invalid(format!("replication factor {key} is not a number")))?,
            other => return Err(invalid(format!("replication factor {key} = {other:?}"))),
        };
        if factor < 0 {
            return Err(invalid(format!("replication factor {key} is negative")));
        }
        count += 1;
    }

    match class.rsplit('.').next().unwrap_or(class) {
        "SimpleStrategy" if replication.contains_key("replication_factor") && count == 1 => Ok(()),
        "SimpleStrategy" => Err(invalid(
            "SimpleStrategy requires exactly a replication_factor".to_string(),
        )),
        "NetworkTopologyStrategy" if count > 0 => Ok(()),
        "NetworkTopologyStrategy" => Err(invalid(
            "NetworkTopologyStrategy requires at least one datacenter".to_string(),
        )),
        other => Err(invalid(format!("unknown replication strategy {other}"))),
    }
}

fn invalid(reason: String) -> SessionError {
    SessionError::InvalidRequest(reason)
}
