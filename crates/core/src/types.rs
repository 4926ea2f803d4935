use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Primary keys of users and experiences are 64-bit integers.
pub type DbId = i64;

/// Backend timestamps are local date-times without a zone (`2025-08-14T10:32:00`).
pub type Timestamp = chrono::NaiveDateTime;

/// Deserialize an identifier the backend emits either as text or as a
/// number (`"65f0c2a1"`, `"3"` or `3`) into its text form.
pub fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a text or numeric id, found {other}"
        ))),
    }
}

/// Like [`id_as_text`], but `null`, a missing field or any other shape
/// yields `None`.
pub fn optional_id_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Treat an explicit JSON `null` like an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
