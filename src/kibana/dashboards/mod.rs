//! Kibana dashboards
//!
//! Import, list and export commands over the dashboards API.

mod exporter;
mod importer;

pub use exporter::DashboardExporter;
pub use importer::DashboardImporter;

use crate::client::Gateway;
use crate::error::Result;
use crate::kibana::saved_objects::{DASHBOARD, DashboardRecord, search};

/// List dashboards whose title matches `pattern`, in server order.
///
/// Any number of matches, including none, is a valid result.
pub async fn list_dashboards<G: Gateway>(
    gateway: &G,
    pattern: Option<&str>,
) -> Result<Vec<DashboardRecord>> {
    search(gateway, DASHBOARD, pattern).await
}

/// Render dashboards as an `ID  NAME` table, ids padded to 40 columns.
pub fn format_table(dashboards: &[DashboardRecord]) -> String {
    let mut table = format!("{:<40} {}\n", "ID", "NAME");
    for dashboard in dashboards {
        table.push_str(&format!("{:<40} {}\n", dashboard.id, dashboard.title));
    }
    table
}
