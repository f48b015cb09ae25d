//! JSON extraction from free-text model replies.
//!
//! Models asked to "respond only with JSON" still wrap their answer in code
//! fences or surround it with prose. [`extract`] recovers the single top-level
//! JSON value from such a reply:
//!
//! 1. trim whitespace
//! 2. drop a leading ```` ``` ```` marker line and a trailing ```` ``` ```` line
//! 3. skip everything before the first `{` or `[`
//! 4. cut after the bracket that brings nesting depth back to zero
//! 5. parse what is left
//!
//! Depth counting does not look inside string literals, so a string value
//! with unbalanced brackets can end the value early. The parse then fails
//! with [`GatewayError::MalformedReply`] instead of yielding a wrong value.

use gateway_core::{GatewayError, GatewayResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

const FENCE: &str = "```";

/// Extract the JSON value (object or array) embedded in `text`.
///
/// The shape of the value is not checked; callers decide whether they
/// expected an object or an array.
///
/// # Errors
/// Returns [`GatewayError::MalformedReply`] carrying a bounded excerpt of the
/// original text when no JSON value can be parsed.
pub fn extract(text: &str) -> GatewayResult<Value> {
    let candidate = candidate_slice(text);
    trace!(candidate = %candidate, "Extracted JSON candidate");

    serde_json::from_str(candidate).map_err(|e| GatewayError::malformed_reply(e.to_string(), text))
}

/// Extract and deserialize into `T`.
///
/// A value that parses as JSON but does not match `T` is a
/// [`GatewayError::ReplyShape`] error.
///
/// # Errors
/// Returns [`GatewayError::MalformedReply`] or [`GatewayError::ReplyShape`]
pub fn extract_as<T: DeserializeOwned>(text: &str) -> GatewayResult<T> {
    let value = extract(text)?;
    serde_json::from_value(value).map_err(|e| GatewayError::reply_shape(e.to_string()))
}

/// Extract a JSON object.
///
/// # Errors
/// Returns [`GatewayError::ReplyShape`] if the extracted value is not an object
pub fn extract_object(text: &str) -> GatewayResult<serde_json::Map<String, Value>> {
    match extract(text)? {
        Value::Object(map) => Ok(map),
        other => Err(GatewayError::reply_shape(format!(
            "expected a JSON object, got {}",
            value_type(&other)
        ))),
    }
}

/// Name of the JSON type of `value`, for diagnostics
#[must_use]
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The substring of `text` that will be handed to the JSON parser
fn candidate_slice(text: &str) -> &str {
    let unfenced = strip_fences(text.trim());

    let Some(start) = unfenced.find(|c| c == '{' || c == '[') else {
        return unfenced;
    };
    let body = &unfenced[start..];

    match matching_close(body) {
        Some(end) => &body[..=end],
        None => body,
    }
}

/// Remove a leading fence line and a trailing fence line.
///
/// Only applies when the text starts with a fence. The opening line may carry
/// a language tag (```` ```json ````).
fn strip_fences(text: &str) -> &str {
    if !text.starts_with(FENCE) {
        return text;
    }

    let inner = match text.find('\n') {
        Some(newline) => &text[newline + 1..],
        None => "",
    };

    let inner = match inner.rfind('\n') {
        Some(newline) if inner[newline + 1..].trim() == FENCE => &inner[..newline],
        None if inner.trim() == FENCE => "",
        _ => inner,
    };

    inner.trim()
}

/// Byte index of the bracket closing the one at index 0
fn matching_close(body: &str) -> Option<usize> {
    let (open, close) = match body.as_bytes().first()? {
        b'{' => (b'{', b'}'),
        b'[' => (b'[', b']'),
        _ => return None,
    };

    let mut depth: usize = 0;
    for (i, byte) in body.bytes().enumerate() {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}
