use indexmap::IndexMap;
use serde_json::Value;

use super::KvMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KvError {
    #[error("invalid JSON: {0}")]
    MalformedJson(String),

    #[error("variables must be a JSON object of key/value pairs")]
    NotAnObject,

    #[error("value for `{key}` must be a string, number or boolean")]
    NonScalarValue { key: String },
}

/// Parses raw editor text into a variable map, keeping the document's key order.
///
/// Numbers and booleans are kept as their JSON text. Duplicate keys inside the document
/// resolve last-wins, like the row editor.
pub fn parse_json_object(text: &str) -> Result<KvMap, KvError> {
    let raw: IndexMap<String, Value> = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(err) => {
            // Valid JSON of the wrong shape gets its own error.
            return match serde_json::from_str::<Value>(text) {
                Ok(_) => Err(KvError::NotAnObject),
                Err(_) => Err(KvError::MalformedJson(err.to_string())),
            };
        }
    };

    scalar_map(raw)
}

/// Narrows a decoded JSON object to string values. Numbers and booleans become their JSON
/// text; anything else is rejected.
pub fn scalar_map(raw: IndexMap<String, Value>) -> Result<KvMap, KvError> {
    let mut out = KvMap::with_capacity(raw.len());
    for (key, value) in raw {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(KvError::NonScalarValue { key });
            }
        };
        out.insert(key, text);
    }
    Ok(out)
}

pub fn render_json(map: &KvMap) -> String {
    serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
#[path = "../tests/kv/json_view_tests.rs"]
mod tests;
