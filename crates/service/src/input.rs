//! Lenient decoding for request fields.
//!
//! Dashboard forms send numbers as strings and strings as numbers. Every
//! field arrives as `Option<String>`; `null`, `false` and `0` count as absent
//! so the required-field check reports them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn loose<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
