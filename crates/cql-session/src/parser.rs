use crate::{
    ast::{ColumnDefinition, CreateKeyspace, CreateTable, PrimaryKey, Statement},
    error::SessionError,
    metadata::OptionLiteral,
};
use cql_model::{CqlIdentifier, CqlType, Ordering, TableName};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use std::collections::BTreeMap;

#[derive(Parser)]
#[grammar = "grammar/cql.pest"]
pub struct CqlParser;

pub type ParseResult<T> = Result<T, SessionError>;

/// Parses a single schema statement.
pub fn parse(input: &str) -> ParseResult<Statement> {
    let mut pairs = CqlParser::parse(Rule::statement, input)
        .map_err(|e| SessionError::Syntax(e.to_string()))?;

    let statement = pairs
        .next()
        .ok_or_else(|| SessionError::Syntax("empty input".to_string()))?;

    for pair in statement.into_inner() {
        match pair.as_rule() {
            Rule::create_keyspace => return build_create_keyspace(pair),
            Rule::drop_keyspace => return build_drop_keyspace(pair),
            Rule::create_table => return build_create_table(pair),
            Rule::drop_table => return build_drop_table(pair),
            Rule::use_keyspace => {
                let name = first_identifier(pair)?;
                return Ok(Statement::Use(name));
            }
            _ => {}
        }
    }

    Err(SessionError::Syntax("no statement found".to_string()))
}

fn build_create_keyspace(pair: Pair<Rule>) -> ParseResult<Statement> {
    let mut name = None;
    let mut if_not_exists = false;
    let mut properties = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::if_not_exists => if_not_exists = true,
            Rule::identifier => name = Some(build_identifier(inner)?),
            Rule::property => properties.push(build_property(inner)?),
            _ => {}
        }
    }

    Ok(Statement::CreateKeyspace(CreateKeyspace {
        name: name.ok_or_else(|| missing("keyspace name"))?,
        if_not_exists,
        properties,
    }))
}

fn build_drop_keyspace(pair: Pair<Rule>) -> ParseResult<Statement> {
    let mut name = None;
    let mut if_exists = false;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::if_exists => if_exists = true,
            Rule::identifier => name = Some(build_identifier(inner)?),
            _ => {}
        }
    }

    Ok(Statement::DropKeyspace {
        name: name.ok_or_else(|| missing("keyspace name"))?,
        if_exists,
    })
}

fn build_drop_table(pair: Pair<Rule>) -> ParseResult<Statement> {
    let mut name = None;
    let mut if_exists = false;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::if_exists => if_exists = true,
            Rule::table_name => name = Some(build_table_name(inner)?),
            _ => {}
        }
    }

    Ok(Statement::DropTable {
        name: name.ok_or_else(|| missing("table name"))?,
        if_exists,
    })
}

fn build_create_table(pair: Pair<Rule>) -> ParseResult<Statement> {
    let mut name = None;
    let mut if_not_exists = false;
    let mut columns = Vec::new();
    let mut primary_keys = Vec::new();
    let mut clustering_order = None;
    let mut compact_storage = false;
    let mut properties = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::if_not_exists => if_not_exists = true,
            Rule::table_name => name = Some(build_table_name(inner)?),
            Rule::column_definition => {
                let (column, inline_key) = build_column_definition(inner)?;
                if inline_key {
                    primary_keys.push(PrimaryKey {
                        partition_key: vec![column.name.clone()],
                        clustering_columns: Vec::new(),
                    });
                }
                columns.push(column);
            }
            Rule::primary_key_clause => primary_keys.push(build_primary_key(inner)?),
            Rule::table_options => {
                for option in inner.into_inner() {
                    match option.as_rule() {
                        Rule::clustering_order => {
                            if clustering_order.is_some() {
                                return Err(SessionError::Syntax(
                                    "CLUSTERING ORDER BY given more than once".to_string(),
                                ));
                            }
                            clustering_order = Some(build_clustering_order(option)?);
                        }
                        Rule::compact_storage => compact_storage = true,
                        Rule::property => properties.push(build_property(option)?),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    Ok(Statement::CreateTable(CreateTable {
        name: name.ok_or_else(|| missing("table name"))?,
        if_not_exists,
        columns,
        primary_keys,
        clustering_order,
        compact_storage,
        properties,
    }))
}

fn build_table_name(pair: Pair<Rule>) -> ParseResult<TableName> {
    let parts = pair
        .into_inner()
        .map(build_identifier)
        .collect::<ParseResult<Vec<_>>>()?;

    match parts.as_slice() {
        [table] => Ok(TableName {
            keyspace: None,
            table: table.clone(),
        }),
        [keyspace, table] => Ok(TableName {
            keyspace: Some(keyspace.clone()),
            table: table.clone(),
        }),
        _ => Err(missing("table name")),
    }
}

fn build_column_definition(pair: Pair<Rule>) -> ParseResult<(ColumnDefinition, bool)> {
    let mut name = None;
    let mut data_type = None;
    let mut is_static = false;
    let mut inline_key = false;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::identifier => name = Some(build_identifier(inner)?),
            Rule::cql_type => data_type = Some(build_type(inner)?),
            Rule::static_marker => is_static = true,
            Rule::inline_primary_key => inline_key = true,
            _ => {}
        }
    }

    let column = ColumnDefinition {
        name: name.ok_or_else(|| missing("column name"))?,
        data_type: data_type.ok_or_else(|| missing("column type"))?,
        is_static,
    };
    Ok((column, inline_key))
}

fn build_primary_key(pair: Pair<Rule>) -> ParseResult<PrimaryKey> {
    let mut partition_key = Vec::new();
    let mut clustering_columns = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::partition_key => {
                partition_key = inner
                    .into_inner()
                    .map(build_identifier)
                    .collect::<ParseResult<Vec<_>>>()?;
            }
            Rule::identifier => clustering_columns.push(build_identifier(inner)?),
            _ => {}
        }
    }

    Ok(PrimaryKey {
        partition_key,
        clustering_columns,
    })
}

fn build_clustering_order(pair: Pair<Rule>) -> ParseResult<Vec<(CqlIdentifier, Ordering)>> {
    pair.into_inner()
        .map(|item| {
            let mut name = None;
            let mut ordering = Ordering::Ascending;
            for inner in item.into_inner() {
                match inner.as_rule() {
                    Rule::identifier => name = Some(build_identifier(inner)?),
                    Rule::direction if inner.as_str().eq_ignore_ascii_case("DESC") => {
                        ordering = Ordering::Descending
                    }
                    _ => {}
                }
            }
            Ok((name.ok_or_else(|| missing("clustering column"))?, ordering))
        })
        .collect()
}

fn build_type(pair: Pair<Rule>) -> ParseResult<CqlType> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| missing("type"))?;
    let rule = inner.as_rule();
    let mut args = Vec::new();
    let mut name = None;

    for arg in inner.into_inner() {
        match arg.as_rule() {
            Rule::cql_type => args.push(build_type(arg)?),
            Rule::identifier => name = Some(arg),
            _ => {}
        }
    }

    let mut args = args.into_iter();
    let mut next = || args.next().ok_or_else(|| missing("type argument"));

    match rule {
        Rule::frozen_type => Ok(CqlType::frozen(next()?)),
        Rule::list_type => Ok(CqlType::list(next()?)),
        Rule::set_type => Ok(CqlType::set(next()?)),
        Rule::map_type => {
            let key = next()?;
            let value = next()?;
            Ok(CqlType::map(key, value))
        }
        Rule::tuple_type => {
            let mut elements = Vec::new();
            while let Ok(element) = next() {
                elements.push(element);
            }
            Ok(CqlType::tuple(elements))
        }
        Rule::named_type => {
            let ident = name.ok_or_else(|| missing("type name"))?;
            // Anything that is not a native type names a user-defined type.
            match CqlType::try_from(ident.as_str()) {
                Ok(native) if !ident.as_str().starts_with('"') => Ok(native),
                _ => Ok(CqlType::udt(build_identifier(ident)?)),
            }
        }
        other => Err(SessionError::Syntax(format!("unexpected type rule {other:?}"))),
    }
}

fn build_property(pair: Pair<Rule>) -> ParseResult<(String, OptionLiteral)> {
    let mut inner = pair.into_inner();
    let name = inner.next().ok_or_else(|| missing("property name"))?;
    let value = inner.next().ok_or_else(|| missing("property value"))?;

    let name = build_identifier(name)?.as_internal().to_string();
    Ok((name, build_literal(value)?))
}

fn build_literal(pair: Pair<Rule>) -> ParseResult<OptionLiteral> {
    let text = pair.as_str();
    match pair.as_rule() {
        Rule::string_literal => Ok(OptionLiteral::Text(unquote(text))),
        Rule::integer_literal => text
            .parse()
            .map(OptionLiteral::Int)
            .map_err(|e| SessionError::Syntax(format!("invalid integer '{text}': {e}"))),
        Rule::float_literal => text
            .parse()
            .map(OptionLiteral::Float)
            .map_err(|e| SessionError::Syntax(format!("invalid float '{text}': {e}"))),
        Rule::boolean_literal => Ok(OptionLiteral::Bool(text.eq_ignore_ascii_case("true"))),
        Rule::map_literal => {
            let mut entries = BTreeMap::new();
            for entry in pair.into_inner() {
                let mut kv = entry.into_inner();
                let key = kv.next().ok_or_else(|| missing("map key"))?;
                let value = kv.next().ok_or_else(|| missing("map value"))?;
                entries.insert(unquote(key.as_str()), build_literal(value)?);
            }
            Ok(OptionLiteral::Map(entries))
        }
        other => Err(SessionError::Syntax(format!("unexpected literal {other:?}"))),
    }
}

fn build_identifier(pair: Pair<Rule>) -> ParseResult<CqlIdentifier> {
    CqlIdentifier::from_cql(pair.as_str()).map_err(|e| SessionError::Syntax(e.to_string()))
}

fn first_identifier(pair: Pair<Rule>) -> ParseResult<CqlIdentifier> {
    let ident = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::identifier)
        .ok_or_else(|| missing("identifier"))?;
    build_identifier(ident)
}

/// Strips the surrounding quotes of a string literal and folds `''`.
fn unquote(text: &str) -> String {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
        .replace("''", "'")
}

fn missing(what: &str) -> SessionError {
    SessionError::Syntax(format!("missing {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_table_with_clause_key() {
        let stmt = parse(
            "CREATE TABLE ks.person (id ascii, date_of_birth date, name ascii, \
             PRIMARY KEY ((id, name), date_of_birth)) \
             WITH CLUSTERING ORDER BY (date_of_birth DESC) AND gc_grace_seconds = 86400;",
        )
        .unwrap();

        let Statement::CreateTable(table) = stmt else {
            panic!("expected CREATE TABLE, got {stmt:?}");
        };
        assert_eq!(table.name.to_string(), "ks.person");
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.columns[1].data_type, CqlType::Date);
        assert_eq!(table.primary_keys.len(), 1);
        assert_eq!(table.primary_keys[0].partition_key.len(), 2);
        assert_eq!(
            table.clustering_order,
            Some(vec![(
                CqlIdentifier::from_cql("date_of_birth").unwrap(),
                Ordering::Descending
            )])
        );
        assert_eq!(
            table.properties,
            vec![("gc_grace_seconds".to_string(), OptionLiteral::Int(86400))]
        );
    }

    #[test]
    fn test_parse_inline_key_and_collections() {
        let stmt = parse(
            "create table if not exists users (id uuid primary key, \
             tags frozen<map<text, list<int>>>, address \"Address\")",
        )
        .unwrap();

        let Statement::CreateTable(table) = stmt else {
            panic!("expected CREATE TABLE, got {stmt:?}");
        };
        assert!(table.if_not_exists);
        assert_eq!(table.primary_keys[0].partition_key[0].as_internal(), "id");
        assert_eq!(
            table.columns[1].data_type,
            CqlType::frozen(CqlType::map(CqlType::Text, CqlType::list(CqlType::Int)))
        );
        assert_eq!(
            table.columns[2].data_type,
            CqlType::udt(CqlIdentifier::from_internal("Address").unwrap())
        );
    }

    #[test]
    fn test_parse_keyspace_statements() {
        let stmt = parse(
            "CREATE KEYSPACE IF NOT EXISTS \"Shop\" WITH replication = \
             {'class': 'SimpleStrategy', 'replication_factor': 1} AND durable_writes = false;",
        )
        .unwrap();

        let Statement::CreateKeyspace(ks) = stmt else {
            panic!("expected CREATE KEYSPACE, got {stmt:?}");
        };
        assert_eq!(ks.name.as_internal(), "Shop");
        assert!(ks.if_not_exists);
        assert_eq!(ks.properties[1], ("durable_writes".to_string(), OptionLiteral::Bool(false)));

        let stmt = parse("DROP KEYSPACE IF EXISTS shop").unwrap();
        assert_eq!(stmt.kind(), "DROP KEYSPACE");
        assert_eq!(parse("USE shop;").unwrap().kind(), "USE");
    }

    #[test]
    fn test_string_literals_are_unescaped() {
        let stmt = parse("CREATE TABLE t (id int PRIMARY KEY) WITH comment = 'it''s mine'").unwrap();
        let Statement::CreateTable(table) = stmt else {
            panic!("expected CREATE TABLE, got {stmt:?}");
        };
        assert_eq!(table.properties[0].1, OptionLiteral::Text("it's mine".to_string()));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(parse("CREATE TABLE"), Err(SessionError::Syntax(_))));
        assert!(matches!(
            parse("SELECT * FROM person"),
            Err(SessionError::Syntax(_))
        ));
    }
}
