//! Dependency discovery
//!
//! Finds the index patterns a dashboard export depends on. Visualizations
//! keep their configuration in `attributes.visState`, a JSON document
//! serialized into a string, and name their index pattern by title in
//! `params.index_pattern` inside it.

use super::embedded;
use super::export_document::ExportDocument;
use serde_json::Value;
use serde_json::value::RawValue;
use std::collections::BTreeSet;

const VIS_STATE: &str = "attributes.visState";
const INDEX_PATTERN: &str = "params.index_pattern";

/// Collect the distinct index-pattern titles referenced by any object in the
/// export.
///
/// Objects without a `visState`, or whose state has no `index_pattern`,
/// contribute nothing. Titles are compared exactly.
pub fn find_index_patterns(document: &ExportDocument) -> BTreeSet<String> {
    document
        .objects()
        .iter()
        .filter_map(|object| index_pattern_of(object))
        .collect()
}

/// Index-pattern title referenced by a single saved object, if any
fn index_pattern_of(object: &RawValue) -> Option<String> {
    let object: Value = match serde_json::from_str(object.get()) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Skipping unreadable export object: {}", e);
            return None;
        }
    };
    let state = embedded::decode_field(&object, VIS_STATE)?;

    match embedded::get_nested(&state, INDEX_PATTERN)? {
        Value::String(title) => Some(title.clone()),
        other => {
            log::debug!(
                "Ignoring non-string index_pattern {} in {}",
                other,
                object.get("id").unwrap_or(&Value::Null)
            );
            None
        }
    }
}
