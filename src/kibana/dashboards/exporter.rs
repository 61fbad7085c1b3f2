//! Dashboard exporter
//!
//! Exports a dashboard via GET /api/kibana/dashboards/export and splices in
//! the saved objects of every index pattern its visualizations reference, so
//! the result can be imported into a Kibana that has none of them.

use crate::client::Gateway;
use crate::error::Result;
use crate::kibana::dependencies::find_index_patterns;
use crate::kibana::export_document::ExportDocument;
use crate::kibana::saved_objects::{
    DASHBOARD, DashboardRecord, INDEX_PATTERN, expect_one, find, quote, search,
};
use owo_colors::OwoColorize;
use serde_json::value::RawValue;

const EXPORT_PATH: &str = "api/kibana/dashboards/export";

/// Exporter for a single dashboard and its index-pattern dependencies
///
/// Every step is fail-fast: a failed lookup or request anywhere aborts the
/// export and nothing is returned. Dependencies are resolved one at a time,
/// so an export costs `2 + D` round-trips for `D` distinct index patterns.
///
/// # Example
/// ```no_run
/// use kibctl::client::{Credentials, KibanaClient};
/// use kibctl::kibana::dashboards::DashboardExporter;
/// use url::Url;
///
/// # async fn example() -> kibctl::Result<()> {
/// let url = Url::parse("http://localhost:5601").unwrap();
/// let client = KibanaClient::try_new(url, Some(Credentials::new("elastic", "changeme")))?;
/// let exporter = DashboardExporter::new(client);
/// let payload = exporter.export("Sales").await?;
/// # Ok(())
/// # }
/// ```
pub struct DashboardExporter<G> {
    gateway: G,
}

impl<G: Gateway> DashboardExporter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Export the dashboard titled `name` as a self-contained JSON document.
    pub async fn export(&self, name: &str) -> Result<Vec<u8>> {
        let document = self.export_document(name).await?;
        document.to_vec()
    }

    /// Same as [`DashboardExporter::export`], returning the parsed document.
    pub async fn export_document(&self, name: &str) -> Result<ExportDocument> {
        log::debug!("Searching dashboards matching name {}", name.cyan());
        let dashboard = self.find_dashboard(name).await?;
        log::debug!("Found dashboard id {}", dashboard.id.bright_black());

        log::debug!("Retrieving partial dashboard export");
        let mut document = self.fetch_export(&dashboard.id).await?;

        let index_patterns = find_index_patterns(&document);
        log::debug!(
            "Dashboard references {} index pattern(s)",
            index_patterns.len()
        );

        for title in &index_patterns {
            let index_pattern = self.fetch_index_pattern(title).await?;
            log::debug!("Adding index-pattern {}", title.cyan());
            document.push(index_pattern);
        }

        log::info!(
            "Exported dashboard {} with {} object(s), {} index pattern(s) added",
            name.cyan(),
            document.len(),
            index_patterns.len()
        );
        Ok(document)
    }

    async fn find_dashboard(&self, name: &str) -> Result<DashboardRecord> {
        let matches = search(&self.gateway, DASHBOARD, Some(&quote(name))).await?;
        expect_one(matches, DASHBOARD, name)
    }

    async fn fetch_export(&self, id: &str) -> Result<ExportDocument> {
        let body = self
            .gateway
            .get(EXPORT_PATH, &[("dashboard", id)])
            .await?;
        ExportDocument::from_slice(&body)
    }

    /// The raw saved object of the index pattern titled `title`
    async fn fetch_index_pattern(&self, title: &str) -> Result<Box<RawValue>> {
        let matches = find(&self.gateway, INDEX_PATTERN, Some(&quote(title))).await?;
        expect_one(matches, INDEX_PATTERN, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeGateway;
    use crate::error::Error;
    use reqwest::Method;
    use serde_json::{Value, json};

    const FIND_PATH: &str = "api/saved_objects/_find";

    fn find_response(objects: &[Value]) -> String {
        json!({ "page": 1, "per_page": 200, "total": objects.len(), "saved_objects": objects })
            .to_string()
    }

    fn dashboard(id: &str, title: &str) -> Value {
        json!({"id": id, "type": "dashboard", "attributes": {"title": title}})
    }

    fn index_pattern(id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "type": "index-pattern",
            "attributes": {"title": title, "timeFieldName": "@timestamp"}
        })
    }

    fn visualization(id: &str, index_pattern: &str) -> Value {
        json!({
            "id": id,
            "type": "visualization",
            "attributes": {
                "title": id,
                "visState": json!({"type": "timelion", "params": {"index_pattern": index_pattern}}).to_string()
            }
        })
    }

    fn sales_export() -> String {
        json!({
            "version": "6.2.4",
            "objects": [
                dashboard("abc123", "Sales"),
                visualization("requests", "logs-*"),
                visualization("errors", "logs-*"),
                visualization("cpu", "metrics-*"),
            ]
        })
        .to_string()
    }

    fn sales_gateway() -> FakeGateway {
        FakeGateway::new()
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"Sales\""),
                200,
                find_response(&[dashboard("abc123", "Sales")]),
            )
            .respond(Method::GET, EXPORT_PATH, None, 200, sales_export())
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"logs-*\""),
                200,
                find_response(&[index_pattern("ip-logs", "logs-*")]),
            )
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"metrics-*\""),
                200,
                find_response(&[index_pattern("ip-metrics", "metrics-*")]),
            )
    }

    #[tokio::test]
    async fn test_export_appends_each_index_pattern_once() {
        let gateway = sales_gateway();
        let exporter = DashboardExporter::new(&gateway);

        let payload = exporter.export("Sales").await.unwrap();
        let merged: Value = serde_json::from_slice(&payload).unwrap();
        let objects = merged["objects"].as_array().unwrap();

        assert_eq!(merged["version"], "6.2.4");
        assert_eq!(objects.len(), 4 + 2);
        assert_eq!(objects[4]["type"], "index-pattern");
        let appended: Vec<&str> = objects[4..]
            .iter()
            .map(|o| o["attributes"]["title"].as_str().unwrap())
            .collect();
        assert!(appended.contains(&"logs-*"));
        assert!(appended.contains(&"metrics-*"));

        // 1 dashboard search + 1 export + 2 index-pattern lookups
        let calls = gateway.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].param("search"), Some("\"Sales\""));
        assert_eq!(calls[1].path, EXPORT_PATH);
        assert_eq!(calls[1].param("dashboard"), Some("abc123"));
        assert_eq!(calls[2].param("type"), Some("index-pattern"));
    }

    #[tokio::test]
    async fn test_export_preserves_original_objects() {
        let gateway = sales_gateway();
        let exporter = DashboardExporter::new(&gateway);

        let original = ExportDocument::from_slice(sales_export().as_bytes()).unwrap();
        let merged = exporter.export_document("Sales").await.unwrap();

        assert_eq!(merged.len(), original.len() + 2);
        for (before, after) in original.objects().iter().zip(merged.objects()) {
            assert_eq!(before.get(), after.get());
        }
        let appended: Value = serde_json::from_str(merged.objects()[4].get()).unwrap();
        assert_eq!(appended["attributes"]["timeFieldName"], "@timestamp");
    }

    #[tokio::test]
    async fn test_no_dashboard_found() {
        let gateway = FakeGateway::new().respond(
            Method::GET,
            FIND_PATH,
            None,
            200,
            find_response(&[]),
        );
        let exporter = DashboardExporter::new(&gateway);

        let err = exporter.export("Missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "no dashboard found matching: Missing");
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_dashboard() {
        let gateway = FakeGateway::new().respond(
            Method::GET,
            FIND_PATH,
            None,
            200,
            find_response(&[dashboard("a", "Sales"), dashboard("b", "Sales EU")]),
        );
        let exporter = DashboardExporter::new(&gateway);

        let err = exporter.export("Sales").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "more than one dashboard found matching: Sales"
        );
    }

    #[tokio::test]
    async fn test_export_endpoint_failure() {
        let gateway = FakeGateway::new()
            .respond(
                Method::GET,
                FIND_PATH,
                None,
                200,
                find_response(&[dashboard("abc123", "Sales")]),
            )
            .respond(Method::GET, EXPORT_PATH, None, 403, "forbidden");
        let exporter = DashboardExporter::new(&gateway);

        let err = exporter.export("Sales").await.unwrap_err();
        match err {
            Error::Api { status, body, .. } => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_index_pattern_aborts_export() {
        let gateway = FakeGateway::new()
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"Sales\""),
                200,
                find_response(&[dashboard("abc123", "Sales")]),
            )
            .respond(Method::GET, EXPORT_PATH, None, 200, sales_export())
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"logs-*\""),
                200,
                find_response(&[index_pattern("ip-logs", "logs-*")]),
            )
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"metrics-*\""),
                200,
                find_response(&[]),
            );
        let exporter = DashboardExporter::new(&gateway);

        let err = exporter.export("Sales").await.unwrap_err();
        assert_eq!(err.to_string(), "no index-pattern found matching: metrics-*");
    }

    #[tokio::test]
    async fn test_ambiguous_index_pattern_aborts_export() {
        let gateway = FakeGateway::new()
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"Sales\""),
                200,
                find_response(&[dashboard("abc123", "Sales")]),
            )
            .respond(Method::GET, EXPORT_PATH, None, 200, sales_export())
            .respond(
                Method::GET,
                FIND_PATH,
                Some("\"logs-*\""),
                200,
                find_response(&[
                    index_pattern("ip-logs", "logs-*"),
                    index_pattern("ip-logs-2", "logs-*,archive-*"),
                ]),
            );
        let exporter = DashboardExporter::new(&gateway);

        let err = exporter.export("Sales").await.unwrap_err();
        assert!(matches!(err, Error::Ambiguous { .. }));
        assert_eq!(
            err.to_string(),
            "more than one index-pattern found matching: logs-*"
        );
        // lookups are sequential in title order, so metrics-* is never requested
        assert_eq!(gateway.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_dashboard_without_dependencies() {
        let export = json!({
            "objects": [dashboard("abc123", "Notes"), json!({"id": "md", "type": "visualization", "attributes": {"visState": "{\"type\":\"markdown\",\"params\":{}}"}})]
        })
        .to_string();
        let gateway = FakeGateway::new()
            .respond(
                Method::GET,
                FIND_PATH,
                None,
                200,
                find_response(&[dashboard("abc123", "Notes")]),
            )
            .respond(Method::GET, EXPORT_PATH, None, 200, export);
        let exporter = DashboardExporter::new(&gateway);

        let merged = exporter.export_document("Notes").await.unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(gateway.calls().len(), 2);
    }
}
