//! Kibana API implementations
//!
//! Saved-object search, dashboard import/export, and the JSON handling the
//! export needs to pull index-pattern dependencies out of visualizations.

pub mod dashboards;
pub mod dependencies;
pub mod embedded;
pub mod export_document;
pub mod saved_objects;

pub use dashboards::{DashboardExporter, DashboardImporter, format_table, list_dashboards};
pub use dependencies::find_index_patterns;
pub use export_document::ExportDocument;
pub use saved_objects::DashboardRecord;
