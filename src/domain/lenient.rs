//! Lenient field deserializers for post records
//!
//! Post JSON is written by several client versions. A field with an
//! unexpected shape degrades to its empty value instead of rejecting the
//! whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A timestamp as stored by clients: ISO-8601 text or epoch milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// The `user` field: either a bare identifier/username or an object with an `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Name(String),
    Object { id: Option<String> },
}

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Identifiers may be strings or numbers; blanks are treated as absent.
pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative counters; anything else reads as zero.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

pub fn values<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    })
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(RawTimestamp::Text(s)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(RawTimestamp::Millis),
        _ => None,
    })
}

pub fn user<'de, D>(deserializer: D) -> Result<Option<UserRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(UserRef::Name(s)),
        Some(Value::Number(n)) => Some(UserRef::Name(n.to_string())),
        Some(Value::Object(map)) => Some(UserRef::Object {
            id: map.get("id").and_then(id_from_value),
        }),
        _ => None,
    })
}
