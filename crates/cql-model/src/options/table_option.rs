use crate::{
    error::SpecError,
    options::{
        rewrite::{self, RewriteRule},
        value::OptionValue,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Table-level storage options.
///
/// Declaration order is the render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableOption {
    CompactStorage,
    BloomFilterFpChance,
    Caching,
    Cdc,
    Comment,
    Compaction,
    Compression,
    CrcCheckChance,
    DclocalReadRepairChance,
    DefaultTimeToLive,
    GcGraceSeconds,
    MaxIndexInterval,
    MemtableFlushPeriodInMs,
    MinIndexInterval,
    ReadRepair,
    ReadRepairChance,
    SpeculativeRetry,
}

/// The value kind an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Flag,
    Boolean,
    Integer,
    /// Integer seconds; durations are converted.
    Seconds,
    /// Integer milliseconds; durations are converted.
    Millis,
    /// Float in `0..=1`; integers widen.
    Probability,
    Text,
    Map,
    /// String restricted by the option's rewrite rule.
    Enumerated,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::Flag => "flag",
            OptionKind::Boolean => "boolean",
            OptionKind::Integer => "integer",
            OptionKind::Seconds => "integer seconds or duration",
            OptionKind::Millis => "integer milliseconds or duration",
            OptionKind::Probability => "float",
            OptionKind::Text => "string",
            OptionKind::Map => "map",
            OptionKind::Enumerated => "enumerated string",
        };
        write!(f, "{name}")
    }
}

const ALL_OPTIONS: [TableOption; 17] = [
    TableOption::CompactStorage,
    TableOption::BloomFilterFpChance,
    TableOption::Caching,
    TableOption::Cdc,
    TableOption::Comment,
    TableOption::Compaction,
    TableOption::Compression,
    TableOption::CrcCheckChance,
    TableOption::DclocalReadRepairChance,
    TableOption::DefaultTimeToLive,
    TableOption::GcGraceSeconds,
    TableOption::MaxIndexInterval,
    TableOption::MemtableFlushPeriodInMs,
    TableOption::MinIndexInterval,
    TableOption::ReadRepair,
    TableOption::ReadRepairChance,
    TableOption::SpeculativeRetry,
];

impl TableOption {
    pub fn all() -> &'static [TableOption] {
        &ALL_OPTIONS
    }

    /// The option name exactly as it appears in CQL.
    pub fn cql_name(&self) -> &'static str {
        match self {
            TableOption::CompactStorage => "COMPACT STORAGE",
            TableOption::BloomFilterFpChance => "bloom_filter_fp_chance",
            TableOption::Caching => "caching",
            TableOption::Cdc => "cdc",
            TableOption::Comment => "comment",
            TableOption::Compaction => "compaction",
            TableOption::Compression => "compression",
            TableOption::CrcCheckChance => "crc_check_chance",
            TableOption::DclocalReadRepairChance => "dclocal_read_repair_chance",
            TableOption::DefaultTimeToLive => "default_time_to_live",
            TableOption::GcGraceSeconds => "gc_grace_seconds",
            TableOption::MaxIndexInterval => "max_index_interval",
            TableOption::MemtableFlushPeriodInMs => "memtable_flush_period_in_ms",
            TableOption::MinIndexInterval => "min_index_interval",
            TableOption::ReadRepair => "read_repair",
            TableOption::ReadRepairChance => "read_repair_chance",
            TableOption::SpeculativeRetry => "speculative_retry",
        }
    }

    pub fn from_cql_name(name: &str) -> Option<Self> {
        let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
        ALL_OPTIONS
            .iter()
            .copied()
            .find(|option| option.cql_name().eq_ignore_ascii_case(&normalized))
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            TableOption::CompactStorage => OptionKind::Flag,
            TableOption::Cdc => OptionKind::Boolean,
            TableOption::Comment => OptionKind::Text,
            TableOption::Caching | TableOption::Compaction | TableOption::Compression => {
                OptionKind::Map
            }
            TableOption::BloomFilterFpChance
            | TableOption::CrcCheckChance
            | TableOption::DclocalReadRepairChance
            | TableOption::ReadRepairChance => OptionKind::Probability,
            TableOption::DefaultTimeToLive | TableOption::GcGraceSeconds => OptionKind::Seconds,
            TableOption::MemtableFlushPeriodInMs => OptionKind::Millis,
            TableOption::MaxIndexInterval | TableOption::MinIndexInterval => OptionKind::Integer,
            TableOption::ReadRepair | TableOption::SpeculativeRetry => OptionKind::Enumerated,
        }
    }

    pub fn rewrite_rule(&self) -> Option<RewriteRule> {
        match self {
            TableOption::SpeculativeRetry => Some(rewrite::speculative_retry),
            TableOption::ReadRepair => Some(rewrite::read_repair),
            _ => None,
        }
    }

    /// Checks `value` against this option's kind and returns the value to store.
    pub fn accept(self, value: OptionValue) -> Result<OptionValue, SpecError> {
        let kind = self.kind();
        let stored = match (kind, value) {
            (OptionKind::Flag, OptionValue::Flag) => OptionValue::Flag,
            (OptionKind::Boolean, OptionValue::Boolean(b)) => OptionValue::Boolean(b),
            (OptionKind::Text, OptionValue::Text(text)) => OptionValue::Text(text),

            (OptionKind::Integer | OptionKind::Seconds | OptionKind::Millis, OptionValue::Integer(n)) => {
                if n < 0 {
                    return Err(self.invalid(format!("{n} is negative")));
                }
                OptionValue::Integer(self.cql_int(i128::from(n))?)
            }
            (OptionKind::Seconds, OptionValue::Duration(d)) => {
                OptionValue::Integer(self.cql_int(i128::from(d.as_secs()))?)
            }
            (OptionKind::Millis, OptionValue::Duration(d)) => {
                OptionValue::Integer(self.cql_int(d.as_millis() as i128)?)
            }

            (OptionKind::Probability, OptionValue::Float(f)) => self.probability(f)?,
            (OptionKind::Probability, OptionValue::Integer(n)) => self.probability(n as f64)?,

            (OptionKind::Map, OptionValue::Map(entries)) => {
                if entries.is_empty() {
                    return Err(self.invalid("map must not be empty".to_string()));
                }
                OptionValue::Map(entries)
            }

            (OptionKind::Enumerated, OptionValue::Text(text)) => {
                self.rewrite(&text)?;
                OptionValue::Text(text)
            }
            (OptionKind::Enumerated, OptionValue::Duration(d))
                if self == TableOption::SpeculativeRetry =>
            {
                OptionValue::Text(format!("{}ms", d.as_millis()))
            }

            (expected, found) => {
                return Err(SpecError::IncompatibleOptionValue {
                    option: self,
                    expected,
                    found: found.kind_name(),
                });
            }
        };

        Ok(stored)
    }

    /// Applies the rewrite rule, if any, to a stored text value.
    pub fn rewrite(&self, raw: &str) -> Result<String, SpecError> {
        match self.rewrite_rule() {
            Some(rule) => rule(raw).map_err(|reason| self.invalid(reason)),
            None => Ok(raw.to_string()),
        }
    }

    fn probability(self, value: f64) -> Result<OptionValue, SpecError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(self.invalid(format!("{value} is outside 0..=1")));
        }
        Ok(OptionValue::Float(value))
    }

    /// Integer options are stored by the engine as 32-bit ints.
    fn cql_int(self, amount: i128) -> Result<i64, SpecError> {
        i32::try_from(amount)
            .map(i64::from)
            .map_err(|_| self.invalid(format!("{amount} does not fit a CQL int")))
    }

    fn invalid(self, reason: String) -> SpecError {
        SpecError::InvalidOptionValue {
            option: self,
            reason,
        }
    }
}

impl fmt::Display for TableOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cql_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_names_round_trip() {
        for option in TableOption::all() {
            assert_eq!(TableOption::from_cql_name(option.cql_name()), Some(*option));
        }
        assert_eq!(
            TableOption::from_cql_name("compact   storage"),
            Some(TableOption::CompactStorage)
        );
        assert_eq!(TableOption::from_cql_name("unknown"), None);
    }

    #[test]
    fn test_accepts_matching_kinds() {
        assert_eq!(
            TableOption::GcGraceSeconds.accept(86400i64.into()).unwrap(),
            OptionValue::Integer(86400)
        );
        assert_eq!(
            TableOption::Cdc.accept(true.into()).unwrap(),
            OptionValue::Boolean(true)
        );
        assert_eq!(
            TableOption::CrcCheckChance.accept(0.9f64.into()).unwrap(),
            OptionValue::Float(0.9)
        );
        assert_eq!(
            TableOption::SpeculativeRetry.accept("99PERCENTILE".into()).unwrap(),
            OptionValue::Text("99PERCENTILE".to_string())
        );
    }

    #[test]
    fn test_durations_convert_to_the_option_unit() {
        assert_eq!(
            TableOption::DefaultTimeToLive
                .accept(Duration::from_secs(3600).into())
                .unwrap(),
            OptionValue::Integer(3600)
        );
        assert_eq!(
            TableOption::MemtableFlushPeriodInMs
                .accept(Duration::from_secs(10).into())
                .unwrap(),
            OptionValue::Integer(10000)
        );
        assert_eq!(
            TableOption::SpeculativeRetry
                .accept(Duration::from_millis(50).into())
                .unwrap(),
            OptionValue::Text("50ms".to_string())
        );
    }

    #[test]
    fn test_integer_widens_for_probabilities() {
        assert_eq!(
            TableOption::BloomFilterFpChance.accept(1i64.into()).unwrap(),
            OptionValue::Float(1.0)
        );
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let err = TableOption::Cdc.accept("true".into()).unwrap_err();
        assert_eq!(
            err,
            SpecError::IncompatibleOptionValue {
                option: TableOption::Cdc,
                expected: OptionKind::Boolean,
                found: "string",
            }
        );

        assert!(matches!(
            TableOption::GcGraceSeconds.accept(1.5f64.into()),
            Err(SpecError::IncompatibleOptionValue { .. })
        ));
        assert!(matches!(
            TableOption::Comment.accept(OptionValue::Flag),
            Err(SpecError::IncompatibleOptionValue { .. })
        ));
    }

    #[test]
    fn test_integers_must_fit_a_cql_int() {
        assert!(matches!(
            TableOption::GcGraceSeconds.accept(3_000_000_000i64.into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            TableOption::GcGraceSeconds.accept(Duration::from_secs(3_000_000_000).into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            TableOption::MinIndexInterval.accept(10_000_000_000i64.into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            TableOption::MemtableFlushPeriodInMs.accept(Duration::from_secs(3_000_000).into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
        assert_eq!(
            TableOption::DefaultTimeToLive
                .accept(i64::from(i32::MAX).into())
                .unwrap(),
            OptionValue::Integer(i64::from(i32::MAX))
        );
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(matches!(
            TableOption::CrcCheckChance.accept(1.5f64.into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            TableOption::GcGraceSeconds.accept((-1i64).into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            TableOption::SpeculativeRetry.accept("sometimes".into()),
            Err(SpecError::InvalidOptionValue { .. })
        ));
    }
}
