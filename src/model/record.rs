use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Label shown for a record whose name is missing or not text
pub const UNNAMED_LABEL: &str = "Unnamed Project";

/// A single project entry in the working set.
///
/// Decoding is lenient: `name` is kept as whatever JSON value was stored,
/// and a non-boolean `completed` is read by truthiness. Keys this client
/// does not know are kept in `extra`. Everything is written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// `None` when the key is absent; `Some(Value::Null)` for an explicit null
    #[serde(
        default,
        deserialize_with = "raw_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// A new, not-yet-completed record
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: Some(Value::String(name.into())),
            completed: false,
            extra: Map::new(),
        }
    }

    /// The name, if it is text
    pub fn name(&self) -> Option<&str> {
        match &self.name {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The name used for display, falling back to [`UNNAMED_LABEL`]
    pub fn label(&self) -> &str {
        self.name().unwrap_or(UNNAMED_LABEL)
    }

    /// The natural key used during merge: the stored name as JSON text.
    /// An absent name and a null name share the `None` key; `42` and `"42"`
    /// are different keys.
    pub fn key(&self) -> Option<String> {
        match &self.name {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.to_string()),
        }
    }

    /// Checkbox-style marker for list output
    pub fn marker(&self) -> &'static str {
        if self.completed { "✅" } else { "⏳" }
    }
}

fn raw_name<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(truthy(&Value::deserialize(deserializer)?))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Coerce an arbitrary JSON value into a record list.
///
/// Anything other than an array yields an empty list. Array elements that
/// are not objects are dropped.
pub fn records_from_value(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Names of the records that are not yet completed, in order
pub fn pending_names(records: &[Record]) -> Vec<&str> {
    records
        .iter()
        .filter(|r| !r.completed)
        .map(Record::label)
        .collect()
}
