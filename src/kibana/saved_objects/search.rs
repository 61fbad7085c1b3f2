//! Saved-object search via GET /api/saved_objects/_find

use super::DashboardRecord;
use crate::client::Gateway;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::value::RawValue;

const FIND_PATH: &str = "api/saved_objects/_find";

/// Results are assumed to fit in a single page of this size.
pub const PER_PAGE: &str = "200";

#[derive(Deserialize)]
struct FindResponse {
    #[serde(default)]
    saved_objects: Vec<Box<RawValue>>,
}

/// Wrap a title in double quotes so Kibana treats it as a phrase.
///
/// Matching is still substring-based on the server, so a quoted title can
/// match more than one object.
pub fn quote(title: &str) -> String {
    format!("\"{}\"", title)
}

/// Find saved objects of `object_type` whose title matches `pattern`,
/// returning each element of `saved_objects` as raw JSON in server order.
///
/// With no pattern, no `search` parameter is sent.
pub async fn find<G: Gateway>(
    gateway: &G,
    object_type: &str,
    pattern: Option<&str>,
) -> Result<Vec<Box<RawValue>>> {
    let mut query = vec![
        ("type", object_type),
        ("per_page", PER_PAGE),
        ("search_fields", "title"),
    ];
    if let Some(pattern) = pattern {
        query.push(("search", pattern));
    }

    log::debug!("Searching {} objects matching {:?}", object_type, pattern);
    let body = gateway.get(FIND_PATH, &query).await?;

    let response: FindResponse = serde_json::from_slice(&body)
        .map_err(|e| Error::parse(format!("{} search response", object_type), e))?;
    log::debug!(
        "Found {} {} object(s)",
        response.saved_objects.len(),
        object_type
    );
    Ok(response.saved_objects)
}

/// Search saved objects and parse each result into a [`DashboardRecord`].
///
/// A single malformed element aborts the whole search.
pub async fn search<G: Gateway>(
    gateway: &G,
    object_type: &str,
    pattern: Option<&str>,
) -> Result<Vec<DashboardRecord>> {
    find(gateway, object_type, pattern)
        .await?
        .iter()
        .map(|raw| {
            serde_json::from_str(raw.get())
                .map_err(|e| Error::parse(format!("{} definition", object_type), e))
        })
        .collect()
}

/// Require exactly one match for `name`.
pub fn expect_one<T>(mut matches: Vec<T>, kind: &str, name: &str) -> Result<T> {
    match matches.len() {
        0 => Err(Error::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::Ambiguous {
            kind: kind.to_string(),
            name: name.to_string(),
        }),
    }
}
