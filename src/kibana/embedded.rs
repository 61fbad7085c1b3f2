//! Embedded JSON documents
//!
//! Kibana stores parts of some saved objects (`attributes.visState`,
//! `attributes.panelsJSON`, ...) as JSON serialized into a string field.
//! These helpers pull such a field out of its host object and parse it as a
//! document of its own.

use serde_json::Value;

/// Follow a dot-separated path of object keys.
pub fn get_nested<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, part| current.get(part))
}

/// Parse the text of an embedded document.
///
/// Some exports escape the embedded document twice; when the text does not
/// parse as-is, `\"` sequences are unescaped and parsing is retried.
pub fn decode(text: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(first) => {
            let unescaped = text.replace(r#"\""#, "\"");
            match serde_json::from_str(&unescaped) {
                Ok(value) => Some(value),
                Err(_) => {
                    log::debug!("Embedded document is not valid JSON: {}", first);
                    None
                }
            }
        }
    }
}

/// Decode the string field at `path` of `object` as an embedded document.
///
/// Returns `None` when the field is absent, not a string, or not JSON.
pub fn decode_field(object: &Value, path: &str) -> Option<Value> {
    get_nested(object, path)?.as_str().and_then(decode)
}
