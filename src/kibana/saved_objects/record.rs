//! Typed views over saved-object search results

use serde::Deserialize;

/// Saved-object type of dashboards
pub const DASHBOARD: &str = "dashboard";
/// Saved-object type of index patterns
pub const INDEX_PATTERN: &str = "index-pattern";

/// A saved object identified by its id, with the title used for matching
///
/// Built from one element of a `_find` response:
/// ```json
/// {"id": "abc123", "type": "dashboard", "attributes": {"title": "Sales"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireRecord")]
pub struct DashboardRecord {
    pub id: String,
    pub title: String,
}

impl DashboardRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Deserialize)]
struct WireRecord {
    id: String,
    #[serde(default)]
    attributes: WireAttributes,
}

#[derive(Deserialize, Default)]
struct WireAttributes {
    #[serde(default)]
    title: String,
}

impl From<WireRecord> for DashboardRecord {
    fn from(wire: WireRecord) -> Self {
        Self {
            id: wire.id,
            title: wire.attributes.title,
        }
    }
}
