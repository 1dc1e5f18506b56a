//! Per-invocation render context assembly.
//!
//! The render context is a flat key→value mapping produced fresh for every
//! message by layering the configured default context under the message
//! payload. The merge is shallow: a payload key replaces the same default key
//! wholesale, nested structures are not merged recursively, and keys unique
//! to either side pass through unchanged.
//!
//! A payload that is not an object carries no keys and therefore contributes
//! nothing to the overlay; the context is then just the default layer.

use serde_json::{Map, Value};

/// Merges the default context layer with a message payload.
///
/// Every key in `payload` overwrites the same key in `defaults`; keys unique
/// to either side pass through. The result is owned by the invocation and
/// never persisted.
///
/// # Example
///
/// ```rust
/// use flowjinja_render::context::merge_context;
/// use serde_json::json;
///
/// let defaults = json!({"a": 1, "b": 2});
/// let payload = json!({"b": 3, "c": 4});
///
/// let merged = merge_context(defaults.as_object().unwrap(), &payload);
/// assert_eq!(serde_json::Value::Object(merged), json!({"a": 1, "b": 3, "c": 4}));
/// ```
pub fn merge_context(defaults: &Map<String, Value>, payload: &Value) -> Map<String, Value> {
    let mut merged = defaults.clone();
    if let Value::Object(overlay) = payload {
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
