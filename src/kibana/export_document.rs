//! Dashboard export documents
//!
//! The document returned by `GET /api/kibana/dashboards/export` is kept as
//! raw JSON: every element of `objects` is written back exactly as the server
//! sent it, so appending dependencies never re-encodes existing objects.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::value::RawValue;

const OBJECTS: &str = "objects";

/// An export payload `{ "objects": [...], ... }`
#[derive(Debug, Clone)]
pub struct ExportDocument {
    /// Top-level fields in document order. The `objects` entry is stale once
    /// parsed; `objects` below is authoritative.
    fields: IndexMap<String, Box<RawValue>>,
    objects: Vec<Box<RawValue>>,
}

impl ExportDocument {
    /// Parse an export payload.
    ///
    /// # Errors
    /// Returns a parse error if the payload is not a JSON object or has no
    /// `objects` array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let fields: IndexMap<String, Box<RawValue>> = serde_json::from_slice(bytes)
            .map_err(|e| Error::parse("dashboard export", e))?;
        let raw_objects = fields
            .get(OBJECTS)
            .ok_or_else(|| Error::parse("dashboard export", "missing objects array"))?;
        let objects: Vec<Box<RawValue>> = serde_json::from_str(raw_objects.get())
            .map_err(|e| Error::parse("dashboard export objects", e))?;

        Ok(Self { fields, objects })
    }

    pub fn objects(&self) -> &[Box<RawValue>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Append a saved object to the end of `objects`.
    pub fn push(&mut self, object: Box<RawValue>) {
        self.objects.push(object);
    }

    /// Serialize the document, splicing the current `objects` back in place.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let objects = serde_json::value::to_raw_value(&self.objects)
            .map_err(|e| Error::parse("merged export objects", e))?;

        let document: IndexMap<&str, &RawValue> = self
            .fields
            .iter()
            .map(|(key, value)| match key.as_str() {
                OBJECTS => (key.as_str(), &*objects),
                _ => (key.as_str(), &**value),
            })
            .collect();

        serde_json::to_vec(&document).map_err(|e| Error::parse("merged export document", e))
    }
}
