//! Helpers for reading loosely typed reply payloads.

use gateway_core::{GatewayError, GatewayResult};
use serde_json::{Map, Value};
use tracing::debug;

/// Render a JSON value as display text; strings lose their quotes
pub(crate) fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A required string field
pub(crate) fn required_str(map: &Map<String, Value>, key: &str) -> GatewayResult<String> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(GatewayError::reply_shape(format!(
            "field '{key}' must be a string, got {}",
            gateway_normalizer::value_type(other)
        ))),
        None => Err(GatewayError::reply_shape(format!(
            "missing required field '{key}'"
        ))),
    }
}

/// An optional list of strings.
///
/// A lone string becomes a one-item list; absent, null or any other shape
/// means empty.
pub(crate) fn string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items.iter().map(display_string).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        None | Some(Value::Null | Value::String(_)) => Vec::new(),
        Some(other) => {
            debug!(
                field = key,
                found = gateway_normalizer::value_type(other),
                "Ignoring non-list field"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_required_str() {
        let map = object(json!({"a": "x", "b": 1}));
        assert_eq!(required_str(&map, "a").ok().as_deref(), Some("x"));
        assert!(required_str(&map, "b").is_err());
        assert!(required_str(&map, "c").is_err());
    }

    #[test]
    fn test_string_list() {
        let map = object(json!({
            "a": ["x", 2, true], "n": null, "s": "x", "blank": " ", "o": {"k": 1}, "num": 3
        }));
        assert_eq!(string_list(&map, "a"), vec!["x", "2", "true"]);
        assert_eq!(string_list(&map, "s"), vec!["x"]);
        assert!(string_list(&map, "n").is_empty());
        assert!(string_list(&map, "missing").is_empty());
        assert!(string_list(&map, "blank").is_empty());
        assert!(string_list(&map, "o").is_empty());
        assert!(string_list(&map, "num").is_empty());
    }
}
