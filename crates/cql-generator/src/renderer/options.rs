use crate::{error::GeneratorError, renderer::Renderer};
use cql_model::{OptionValue, TableOption};

/// Renders `name = value`, or the bare name for flag options.
pub fn render_option(
    r: &Renderer,
    option: TableOption,
    value: &OptionValue,
) -> Result<String, GeneratorError> {
    if let OptionValue::Flag = value {
        return Ok(option.cql_name().to_string());
    }
    Ok(format!(
        "{} = {}",
        option.cql_name(),
        render_value(r, option, value)?
    ))
}

pub fn render_value(
    r: &Renderer,
    option: TableOption,
    value: &OptionValue,
) -> Result<String, GeneratorError> {
    let rendered = match value {
        OptionValue::Flag => String::new(),
        OptionValue::Boolean(b) => b.to_string(),
        OptionValue::Integer(n) => n.to_string(),
        OptionValue::Float(f) => render_float(*f),
        OptionValue::Text(text) => r.dialect.quote_literal(&option.rewrite(text)?),
        // Durations are normalised to integers when recorded.
        OptionValue::Duration(d) => d.as_secs().to_string(),
        OptionValue::Map(entries) => render_map(
            r,
            entries
                .iter()
                .map(|(k, v)| (k.as_str(), r.dialect.quote_literal(v))),
        ),
    };
    Ok(rendered)
}

/// Renders a `{'key': value, ...}` map literal; values are already rendered.
pub fn render_map<'k>(r: &Renderer, entries: impl Iterator<Item = (&'k str, String)>) -> String {
    let body = entries
        .map(|(k, v)| format!("{}: {}", r.dialect.quote_literal(k), v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

/// Floats always carry a decimal point so the engine reads them as doubles.
fn render_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
