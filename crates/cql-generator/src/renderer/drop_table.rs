use crate::{
    error::GeneratorError,
    generator::CqlStatement,
    renderer::{Render, Renderer},
};
use cql_model::DropTableSpecification;

impl CqlStatement for DropTableSpecification {
    fn kind(&self) -> &'static str {
        "DROP TABLE"
    }
}

impl Render for DropTableSpecification {
    fn render(&self, r: &mut Renderer) -> Result<(), GeneratorError> {
        r.cql.push_str("DROP TABLE ");
        if self.is_if_exists() {
            r.cql.push_str("IF EXISTS ");
        }
        r.cql.push_str(&r.dialect.render_table_name(self.name()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::to_cql;
    use cql_model::DropTableSpecification;

    #[test]
    fn test_render_drop_table() {
        let spec = DropTableSpecification::drop_table("person")
            .unwrap()
            .if_exists();
        assert_eq!(to_cql(&spec).unwrap(), "DROP TABLE IF EXISTS person;");

        let spec = DropTableSpecification::drop_table_in("shop", r#""Orders""#).unwrap();
        assert_eq!(to_cql(&spec).unwrap(), r#"DROP TABLE shop."Orders";"#);
    }
}
