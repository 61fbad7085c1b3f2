//! Dashboard importer
//!
//! Imports dashboards via POST /api/kibana/dashboards/import?force=true

use crate::client::Gateway;
use crate::error::{Error, Result};

const IMPORT_PATH: &str = "api/kibana/dashboards/import";

/// Importer for dashboard export documents
///
/// Imports always use `force=true`, so objects with the same id already in
/// Kibana are overwritten.
pub struct DashboardImporter<G> {
    gateway: G,
}

impl<G: Gateway> DashboardImporter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Send `payload` to Kibana, returning the response body as confirmation.
    ///
    /// # Errors
    /// An empty payload is rejected before any request is made.
    pub async fn import(&self, payload: &[u8]) -> Result<String> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::validation("dashboard import payload is empty"));
        }

        log::debug!(
            "Importing dashboard:\n{}",
            String::from_utf8_lossy(payload)
        );
        let body = self
            .gateway
            .post(IMPORT_PATH, &[("force", "true")], payload)
            .await?;

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
