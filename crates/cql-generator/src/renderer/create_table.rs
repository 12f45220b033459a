use crate::{
    error::GeneratorError,
    generator::CqlStatement,
    renderer::{Render, Renderer, options::render_option},
};
use cql_model::{ColumnRole, ColumnSpecification, CqlType, CreateTableSpecification, Ordering};

impl CqlStatement for CreateTableSpecification {
    fn validate(&self) -> Result<(), GeneratorError> {
        let invalid = |reason: &str| GeneratorError::InvalidTableDefinition {
            table: self.name().clone(),
            reason: reason.to_string(),
        };

        if self.partition_key_columns().next().is_none() {
            return Err(invalid("at least one partition key column is required"));
        }

        let has_clustering = self.clustering_key_columns().next().is_some();
        if !has_clustering && self.columns().iter().any(|c| c.is_static()) {
            return Err(invalid(
                "static columns require at least one clustering column",
            ));
        }

        let value_columns: Vec<&ColumnSpecification> = self
            .columns()
            .iter()
            .filter(|c| matches!(c.role, ColumnRole::Regular | ColumnRole::Static))
            .collect();
        let counters = value_columns
            .iter()
            .filter(|c| c.data_type == CqlType::Counter)
            .count();
        if counters > 0 && counters != value_columns.len() {
            return Err(invalid(
                "counter columns cannot be mixed with non-counter columns",
            ));
        }

        Ok(())
    }

    fn kind(&self) -> &'static str {
        "CREATE TABLE"
    }
}

impl Render for CreateTableSpecification {
    fn render(&self, r: &mut Renderer) -> Result<(), GeneratorError> {
        r.cql.push_str("CREATE TABLE ");
        if self.is_if_not_exists() {
            r.cql.push_str("IF NOT EXISTS ");
        }
        r.cql.push_str(&r.dialect.render_table_name(self.name()));
        r.cql.push(' ');

        let mut items: Vec<String> = self
            .columns()
            .iter()
            .map(|col| render_column(r, col))
            .collect();
        items.push(render_primary_key(self, r));
        r.push_list(&items);

        let mut clauses = Vec::new();

        let clustering: Vec<&ColumnSpecification> = self.clustering_key_columns().collect();
        if clustering
            .iter()
            .any(|c| c.ordering() == Ordering::Descending)
        {
            let order = clustering
                .iter()
                .map(|c| format!("{} {}", r.dialect.quote_identifier(&c.name), c.ordering().cql()))
                .collect::<Vec<_>>()
                .join(", ");
            clauses.push(format!("CLUSTERING ORDER BY ({order})"));
        }

        for (option, value) in self.options() {
            clauses.push(render_option(r, *option, value)?);
        }

        if !clauses.is_empty() {
            r.cql.push_str(" WITH ");
            r.cql.push_str(&clauses.join(" AND "));
        }

        Ok(())
    }
}

/// Partition keys are grouped in parentheses only when there is more than one.
fn render_primary_key(spec: &CreateTableSpecification, r: &Renderer) -> String {
    let partition: Vec<String> = spec
        .partition_key_columns()
        .map(|c| r.dialect.quote_identifier(&c.name))
        .collect();

    let mut parts = Vec::new();
    if partition.len() > 1 {
        parts.push(format!("({})", partition.join(", ")));
    } else {
        parts.extend(partition);
    }
    parts.extend(
        spec.clustering_key_columns()
            .map(|c| r.dialect.quote_identifier(&c.name)),
    );

    format!("PRIMARY KEY ({})", parts.join(", "))
}

fn render_column(r: &Renderer, col: &ColumnSpecification) -> String {
    let mut def = format!(
        "{} {}",
        r.dialect.quote_identifier(&col.name),
        r.dialect.render_data_type(&col.data_type)
    );
    if col.is_static() {
        def.push_str(" STATIC");
    }
    def
}

#[cfg(test)]
mod tests {
    use crate::{
        config::GeneratorConfig,
        error::GeneratorError,
        generator::{CqlGenerator, to_cql},
    };
    use cql_model::{CqlType, CreateTableSpecification, OptionValue, Ordering, TableOption};

    fn person() -> CreateTableSpecification {
        CreateTableSpecification::create_table("person")
            .unwrap()
            .partition_key_column("id", CqlType::Ascii)
            .unwrap()
            .clustered_key_column("date_of_birth", CqlType::Date)
            .unwrap()
            .column("name", CqlType::Ascii)
            .unwrap()
    }

    #[test]
    fn test_render_simple_table() {
        let cql = to_cql(&person()).unwrap();
        assert_eq!(
            cql,
            "CREATE TABLE person (id ascii, date_of_birth date, name ascii, PRIMARY KEY (id, date_of_birth));"
        );
    }

    #[test]
    fn test_single_partition_key_without_clustering() {
        let spec = CreateTableSpecification::create_table("users")
            .unwrap()
            .if_not_exists()
            .partition_key_column("id", CqlType::Uuid)
            .unwrap()
            .column("emails", CqlType::set(CqlType::Text))
            .unwrap();

        assert_eq!(
            to_cql(&spec).unwrap(),
            "CREATE TABLE IF NOT EXISTS users (id uuid, emails set<text>, PRIMARY KEY (id));"
        );
    }

    #[test]
    fn test_composite_partition_key_and_clustering_order() {
        let spec = CreateTableSpecification::create_table("person")
            .unwrap()
            .partition_key_column("id", CqlType::Ascii)
            .unwrap()
            .partition_key_column("country", CqlType::Ascii)
            .unwrap()
            .clustered_key_column_ordered("date_of_birth", CqlType::Date, Ordering::Descending)
            .unwrap()
            .clustered_key_column("age", CqlType::SmallInt)
            .unwrap()
            .column("name", CqlType::Ascii)
            .unwrap()
            .static_column("region", CqlType::Text)
            .unwrap();

        assert_eq!(
            to_cql(&spec).unwrap(),
            "CREATE TABLE person (id ascii, country ascii, date_of_birth date, age smallint, \
             name ascii, region text STATIC, PRIMARY KEY ((id, country), date_of_birth, age)) \
             WITH CLUSTERING ORDER BY (date_of_birth DESC, age ASC);"
        );
    }

    #[test]
    fn test_ascending_only_clustering_has_no_order_clause() {
        let spec = person();
        let cql = to_cql(&spec).unwrap();
        assert!(!cql.contains("CLUSTERING ORDER BY"));
    }

    #[test]
    fn test_options_follow_clustering_order() {
        let spec = CreateTableSpecification::create_table_in("CqlGenerator_it", "person")
            .unwrap()
            .partition_key_column("id", CqlType::Int)
            .unwrap()
            .clustered_key_column_ordered("date_of_birth", CqlType::Date, Ordering::Descending)
            .unwrap()
            .column("name", CqlType::Ascii)
            .unwrap()
            .with(TableOption::SpeculativeRetry, "99PERCENTILE")
            .unwrap()
            .with(TableOption::GcGraceSeconds, 86400i64)
            .unwrap()
            .with(TableOption::Cdc, true)
            .unwrap()
            .with(TableOption::CrcCheckChance, 0.9f64)
            .unwrap()
            .with_flag(TableOption::CompactStorage)
            .unwrap();

        assert_eq!(
            to_cql(&spec).unwrap(),
            "CREATE TABLE cqlgenerator_it.person (id int, date_of_birth date, name ascii, \
             PRIMARY KEY (id, date_of_birth)) WITH CLUSTERING ORDER BY (date_of_birth DESC) \
             AND COMPACT STORAGE AND cdc = true AND crc_check_chance = 0.9 \
             AND gc_grace_seconds = 86400 AND speculative_retry = '99p';"
        );
    }

    #[test]
    fn test_options_without_clustering_order_start_with_with() {
        let spec = person()
            .with(
                TableOption::Caching,
                OptionValue::map([("keys", "ALL"), ("rows_per_partition", "NONE")]),
            )
            .unwrap();

        let cql = to_cql(&spec).unwrap();
        assert!(cql.ends_with(
            "PRIMARY KEY (id, date_of_birth)) WITH caching = {'keys': 'ALL', 'rows_per_partition': 'NONE'};"
        ));
    }

    #[test]
    fn test_quoted_identifiers() {
        let spec = CreateTableSpecification::create_table(r#""Person""#)
            .unwrap()
            .partition_key_column(r#""Id""#, CqlType::Uuid)
            .unwrap()
            .column(r#""select""#, CqlType::Text)
            .unwrap();

        assert_eq!(
            to_cql(&spec).unwrap(),
            r#"CREATE TABLE "Person" ("Id" uuid, "select" text, PRIMARY KEY ("Id"));"#
        );
    }

    #[test]
    fn test_pretty_output_without_semicolon() {
        let config = GeneratorConfig {
            trailing_semicolon: false,
            pretty: true,
        };
        let cql = CqlGenerator::new(config).to_cql(&person()).unwrap();

        let expected = "CREATE TABLE person (\n\tid ascii,\n\tdate_of_birth date,\n\tname ascii,\n\tPRIMARY KEY (id, date_of_birth)\n)";
        assert_eq!(cql, expected);
    }

    #[test]
    fn test_missing_partition_key_is_rejected() {
        let spec = CreateTableSpecification::create_table("person")
            .unwrap()
            .clustered_key_column("date_of_birth", CqlType::Date)
            .unwrap()
            .column("name", CqlType::Ascii)
            .unwrap();

        let err = to_cql(&spec).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidTableDefinition { .. }));
    }

    #[test]
    fn test_static_column_without_clustering_is_rejected() {
        let spec = CreateTableSpecification::create_table("person")
            .unwrap()
            .partition_key_column("id", CqlType::Ascii)
            .unwrap()
            .static_column("region", CqlType::Text)
            .unwrap();

        let err = to_cql(&spec).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidTableDefinition { .. }));
    }

    #[test]
    fn test_counter_columns_cannot_mix() {
        let spec = CreateTableSpecification::create_table("page_views")
            .unwrap()
            .partition_key_column("page", CqlType::Text)
            .unwrap()
            .column("views", CqlType::Counter)
            .unwrap();
        assert!(to_cql(&spec).is_ok());

        let spec = spec.column("title", CqlType::Text).unwrap();
        assert!(matches!(
            to_cql(&spec),
            Err(GeneratorError::InvalidTableDefinition { .. })
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let spec = person()
            .with(TableOption::MaxIndexInterval, 2048i64)
            .unwrap()
            .with(TableOption::MinIndexInterval, 128i64)
            .unwrap();

        assert_eq!(to_cql(&spec).unwrap(), to_cql(&spec).unwrap());
    }
}
