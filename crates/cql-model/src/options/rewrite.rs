//! Dialect rewrite rules for enumerated option values.
//!
//! Each rule both validates a raw value and produces the form the engine
//! stores, so the same function backs construction-time checks and rendering.

/// A rewrite rule maps a raw option value to its canonical CQL form.
pub type RewriteRule = fn(&str) -> Result<String, String>;

/// Rewrites a speculative retry policy to the compact driver notation.
///
/// - `ALWAYS` / `NONE` (`NEVER` is accepted as an alias of `NONE`)
/// - `99PERCENTILE`, `99.9percentile`, `99p` -> `99p`, `99.9p`
/// - `50MS`, `50ms` -> `50ms`
/// - `MIN(99p,50ms)` / `MAX(...)` hybrids, each side rewritten
pub fn speculative_retry(value: &str) -> Result<String, String> {
    let upper = value.trim().to_ascii_uppercase();

    match upper.as_str() {
        "ALWAYS" => return Ok("ALWAYS".to_string()),
        "NONE" | "NEVER" => return Ok("NONE".to_string()),
        _ => {}
    }

    for hybrid in ["MIN", "MAX"] {
        if let Some(args) = upper
            .strip_prefix(hybrid)
            .and_then(|rest| rest.trim_start().strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = args.split(',').collect();
            if parts.len() != 2 {
                return Err(format!("'{value}' must have exactly two arguments"));
            }
            let left = retry_threshold(parts[0].trim())
                .ok_or_else(|| format!("'{}' is not a percentile or latency", parts[0].trim()))?;
            let right = retry_threshold(parts[1].trim())
                .ok_or_else(|| format!("'{}' is not a percentile or latency", parts[1].trim()))?;
            return Ok(format!("{hybrid}({left},{right})"));
        }
    }

    retry_threshold(&upper).ok_or_else(|| format!("unknown speculative retry policy '{value}'"))
}

/// Upper-cases and checks a read repair strategy.
pub fn read_repair(value: &str) -> Result<String, String> {
    let upper = value.trim().to_ascii_uppercase();
    match upper.as_str() {
        "BLOCKING" | "NONE" => Ok(upper),
        _ => Err(format!(
            "unknown read repair strategy '{value}', expected BLOCKING or NONE"
        )),
    }
}

fn retry_threshold(upper: &str) -> Option<String> {
    if let Some(number) = upper
        .strip_suffix("PERCENTILE")
        .or_else(|| upper.strip_suffix('P'))
    {
        let number = number.trim();
        if !is_plain_decimal(number) {
            return None;
        }
        let percentile = number.parse::<f64>().ok()?;
        if !percentile.is_finite() || percentile <= 0.0 || percentile >= 100.0 {
            return None;
        }
        return Some(format!("{}p", compact_number(percentile)));
    }

    if let Some(number) = upper.strip_suffix("MS") {
        let number = number.trim();
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let millis = number.parse::<u64>().ok()?;
        return Some(format!("{millis}ms"));
    }

    None
}

/// Digits with at most one decimal point; no sign, exponent or `NaN`/`inf`.
fn is_plain_decimal(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().filter(|b| *b == b'.').count() <= 1
        && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// Only called with finite values inside `0..100`.
fn compact_number(number: f64) -> String {
    if number.fract() == 0.0 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}
