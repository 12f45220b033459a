use crate::core::identifier::CqlIdentifier;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

/// Column types understood by the generator.
///
/// Collections nest, so `list<frozen<map<text, int>>>` is
/// `List(Frozen(Map(Text, Int)))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CqlType {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    SmallInt,
    Text,
    Time,
    Timestamp,
    TimeUuid,
    TinyInt,
    Uuid,
    VarInt,
    List(Box<CqlType>),
    Set(Box<CqlType>),
    Map(Box<CqlType>, Box<CqlType>),
    Tuple(Vec<CqlType>),
    Frozen(Box<CqlType>),
    Udt(CqlIdentifier),
}

lazy_static! {
    static ref PRIMITIVE_TYPE_MAP: HashMap<&'static str, CqlType> = build_primitive_type_map();
}

impl CqlType {
    pub fn list(element: CqlType) -> Self {
        CqlType::List(Box::new(element))
    }

    pub fn set(element: CqlType) -> Self {
        CqlType::Set(Box::new(element))
    }

    pub fn map(key: CqlType, value: CqlType) -> Self {
        CqlType::Map(Box::new(key), Box::new(value))
    }

    pub fn frozen(inner: CqlType) -> Self {
        CqlType::Frozen(Box::new(inner))
    }

    pub fn tuple(elements: Vec<CqlType>) -> Self {
        CqlType::Tuple(elements)
    }

    pub fn udt(name: CqlIdentifier) -> Self {
        CqlType::Udt(name)
    }

    /// Textual CQL form, including nested generic syntax for collections.
    pub fn cql_name(&self) -> Cow<'_, str> {
        match self {
            CqlType::Ascii => Cow::Borrowed("ascii"),
            CqlType::BigInt => Cow::Borrowed("bigint"),
            CqlType::Blob => Cow::Borrowed("blob"),
            CqlType::Boolean => Cow::Borrowed("boolean"),
            CqlType::Counter => Cow::Borrowed("counter"),
            CqlType::Date => Cow::Borrowed("date"),
            CqlType::Decimal => Cow::Borrowed("decimal"),
            CqlType::Double => Cow::Borrowed("double"),
            CqlType::Duration => Cow::Borrowed("duration"),
            CqlType::Float => Cow::Borrowed("float"),
            CqlType::Inet => Cow::Borrowed("inet"),
            CqlType::Int => Cow::Borrowed("int"),
            CqlType::SmallInt => Cow::Borrowed("smallint"),
            CqlType::Text => Cow::Borrowed("text"),
            CqlType::Time => Cow::Borrowed("time"),
            CqlType::Timestamp => Cow::Borrowed("timestamp"),
            CqlType::TimeUuid => Cow::Borrowed("timeuuid"),
            CqlType::TinyInt => Cow::Borrowed("tinyint"),
            CqlType::Uuid => Cow::Borrowed("uuid"),
            CqlType::VarInt => Cow::Borrowed("varint"),
            CqlType::List(element) => Cow::Owned(format!("list<{}>", element.cql_name())),
            CqlType::Set(element) => Cow::Owned(format!("set<{}>", element.cql_name())),
            CqlType::Map(key, value) => {
                Cow::Owned(format!("map<{}, {}>", key.cql_name(), value.cql_name()))
            }
            CqlType::Tuple(elements) => Cow::Owned(format!(
                "tuple<{}>",
                elements
                    .iter()
                    .map(|e| e.cql_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            CqlType::Frozen(inner) => Cow::Owned(format!("frozen<{}>", inner.cql_name())),
            CqlType::Udt(name) => Cow::Owned(name.as_cql()),
        }
    }

    /// Non-frozen collections and UDTs are multi-cell and so cannot be part of
    /// a primary key. Counters and durations are excluded as well.
    pub fn is_valid_key_type(&self) -> bool {
        !matches!(
            self,
            CqlType::List(_)
                | CqlType::Set(_)
                | CqlType::Map(..)
                | CqlType::Udt(_)
                | CqlType::Counter
                | CqlType::Duration
        )
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, CqlType::List(_) | CqlType::Set(_) | CqlType::Map(..))
    }

    fn from_primitive_name(type_name: &str) -> Option<Self> {
        PRIMITIVE_TYPE_MAP
            .get(type_name.trim().to_lowercase().as_str())
            .cloned()
    }
}

impl TryFrom<&str> for CqlType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        CqlType::from_primitive_name(s).ok_or_else(|| format!("Unknown CQL type: {s}"))
    }
}

impl fmt::Display for CqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cql_name())
    }
}

fn build_primitive_type_map() -> HashMap<&'static str, CqlType> {
    use CqlType::*;

    let entries = [
        ("ascii", Ascii),
        ("bigint", BigInt),
        ("blob", Blob),
        ("boolean", Boolean),
        ("counter", Counter),
        ("date", Date),
        ("decimal", Decimal),
        ("double", Double),
        ("duration", Duration),
        ("float", Float),
        ("inet", Inet),
        ("int", Int),
        ("smallint", SmallInt),
        ("text", Text),
        ("varchar", Text),
        ("time", Time),
        ("timestamp", Timestamp),
        ("timeuuid", TimeUuid),
        ("tinyint", TinyInt),
        ("uuid", Uuid),
        ("varint", VarInt),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}
