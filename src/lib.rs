//! kibctl
//!
//! A command-line client for Kibana dashboards: import, list, and export
//! together with the index patterns they depend on.

pub mod client;
pub mod config;
pub mod error;
pub mod kibana;

// Re-exports for convenience
pub use client::{Credentials, Gateway, KibanaClient};
pub use config::{Config, ConnectionArgs};
pub use error::{Error, Result};
pub use kibana::{DashboardExporter, DashboardImporter, DashboardRecord, ExportDocument};
