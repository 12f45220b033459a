use crate::error::SpecError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, sync::Arc};

lazy_static! {
    /// Keywords that cannot appear unquoted as identifiers.
    static ref RESERVED_KEYWORDS: HashSet<&'static str> = [
        "add", "allow", "alter", "and", "apply", "asc", "authorize", "batch", "begin", "by",
        "columnfamily", "create", "default", "delete", "desc", "describe", "drop", "entries",
        "execute", "from", "full", "grant", "if", "in", "index", "infinity", "insert", "into",
        "is", "keyspace", "limit", "materialized", "mbean", "mbeans", "modify", "nan",
        "norecursive", "not", "null", "of", "on", "or", "order", "primary", "rename", "replace",
        "revoke", "schema", "select", "set", "table", "to", "token", "truncate", "unlogged",
        "unset", "update", "use", "using", "view", "where", "with",
    ]
    .into_iter()
    .collect();
}

/// A CQL identifier held in its internal, case-exact form.
///
/// Unquoted CQL text is case-insensitive and folds to lower case, while
/// double-quoted text keeps its case. Rendering goes the other way: the
/// internal form is emitted bare when that round-trips, quoted otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CqlIdentifier(Arc<str>);

impl CqlIdentifier {
    /// Parses an identifier as it would appear in a CQL statement.
    pub fn from_cql(text: &str) -> Result<Self, SpecError> {
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            let inner = &text[1..text.len() - 1];
            if inner.is_empty() {
                return Err(invalid_name(text, "quoted identifier is empty"));
            }
            if inner.replace("\"\"", "").contains('"') {
                return Err(invalid_name(text, "unescaped double quote"));
            }
            return Ok(Self(Arc::from(inner.replace("\"\"", "\""))));
        }

        if text.is_empty() {
            return Err(invalid_name(text, "identifier is empty"));
        }
        if !is_unquoted_form(text) {
            return Err(invalid_name(
                text,
                "unquoted identifiers must start with a letter and contain only letters, digits and '_'",
            ));
        }

        Ok(Self(Arc::from(text.to_lowercase())))
    }

    /// Takes the text verbatim as the internal form.
    pub fn from_internal(text: &str) -> Result<Self, SpecError> {
        if text.is_empty() {
            return Err(invalid_name(text, "identifier is empty"));
        }
        Ok(Self(Arc::from(text)))
    }

    pub fn as_internal(&self) -> &str {
        &self.0
    }

    /// Renders the identifier for a CQL statement, quoting only when required.
    pub fn as_cql(&self) -> String {
        if self.needs_quotes() {
            format!("\"{}\"", self.0.replace('"', "\"\""))
        } else {
            self.0.to_string()
        }
    }

    pub fn needs_quotes(&self) -> bool {
        let internal = self.as_internal();
        !(is_unquoted_form(internal)
            && !internal.chars().any(|c| c.is_ascii_uppercase())
            && !is_reserved_keyword(internal))
    }
}

impl fmt::Display for CqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cql())
    }
}

pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS.contains(word.to_lowercase().as_str())
}

fn is_unquoted_form(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid_name(name: &str, reason: &str) -> SpecError {
    SpecError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Conversion accepted wherever the builders take a name: CQL text or an
/// already-constructed identifier.
pub trait IntoIdentifier {
    fn into_identifier(self) -> Result<CqlIdentifier, SpecError>;
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> Result<CqlIdentifier, SpecError> {
        CqlIdentifier::from_cql(self)
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> Result<CqlIdentifier, SpecError> {
        CqlIdentifier::from_cql(&self)
    }
}

impl IntoIdentifier for CqlIdentifier {
    fn into_identifier(self) -> Result<CqlIdentifier, SpecError> {
        Ok(self)
    }
}

impl IntoIdentifier for &CqlIdentifier {
    fn into_identifier(self) -> Result<CqlIdentifier, SpecError> {
        Ok(self.clone())
    }
}

/// A table identifier, optionally qualified by its keyspace.
///
/// Without a keyspace the statement targets the session's current keyspace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
    pub keyspace: Option<CqlIdentifier>,
    pub table: CqlIdentifier,
}

impl TableName {
    pub fn new(table: impl IntoIdentifier) -> Result<Self, SpecError> {
        Ok(Self {
            keyspace: None,
            table: table.into_identifier()?,
        })
    }

    pub fn qualified(
        keyspace: impl IntoIdentifier,
        table: impl IntoIdentifier,
    ) -> Result<Self, SpecError> {
        Ok(Self {
            keyspace: Some(keyspace.into_identifier()?),
            table: table.into_identifier()?,
        })
    }

    pub fn as_cql(&self) -> String {
        match &self.keyspace {
            Some(keyspace) => format!("{}.{}", keyspace.as_cql(), self.table.as_cql()),
            None => self.table.as_cql(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_identifiers_fold_to_lower_case() {
        let ident = CqlIdentifier::from_cql("CqlGenerator_it").unwrap();
        assert_eq!(ident.as_internal(), "cqlgenerator_it");
        assert_eq!(ident.as_cql(), "cqlgenerator_it");
    }

    #[test]
    fn test_quoted_identifiers_keep_case() {
        let ident = CqlIdentifier::from_cql(r#""MyTable""#).unwrap();
        assert_eq!(ident.as_internal(), "MyTable");
        assert_eq!(ident.as_cql(), r#""MyTable""#);
    }

    #[test]
    fn test_escaped_quotes_round_trip() {
        let ident = CqlIdentifier::from_cql(r#""say ""hi""""#).unwrap();
        assert_eq!(ident.as_internal(), r#"say "hi""#);
        assert_eq!(ident.as_cql(), r#""say ""hi""""#);
    }

    #[test]
    fn test_reserved_keywords_are_quoted() {
        let ident = CqlIdentifier::from_internal("order").unwrap();
        assert!(ident.needs_quotes());
        assert_eq!(ident.as_cql(), r#""order""#);
    }

    #[test]
    fn test_internal_form_with_special_characters_is_quoted() {
        let ident = CqlIdentifier::from_internal("first name").unwrap();
        assert_eq!(ident.as_cql(), r#""first name""#);

        let ident = CqlIdentifier::from_internal("1st").unwrap();
        assert_eq!(ident.as_cql(), r#""1st""#);
    }

    #[test]
    fn test_empty_and_malformed_names_are_rejected() {
        assert!(matches!(
            CqlIdentifier::from_cql(""),
            Err(SpecError::InvalidName { .. })
        ));
        assert!(matches!(
            CqlIdentifier::from_cql(r#""""#),
            Err(SpecError::InvalidName { .. })
        ));
        assert!(matches!(
            CqlIdentifier::from_cql("first name"),
            Err(SpecError::InvalidName { .. })
        ));
        assert!(matches!(
            CqlIdentifier::from_internal(""),
            Err(SpecError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_table_name_rendering() {
        let name = TableName::qualified("CqlGenerator_it", "person").unwrap();
        assert_eq!(name.as_cql(), "cqlgenerator_it.person");

        let name = TableName::new(r#""Person""#).unwrap();
        assert_eq!(name.as_cql(), r#""Person""#);
        assert!(name.keyspace.is_none());
    }
}
