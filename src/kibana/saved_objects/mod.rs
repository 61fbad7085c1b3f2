//! Kibana Saved Objects API
//!
//! Provides title search over saved objects and the record types parsed
//! from its results.

mod record;
mod search;

pub use record::{DASHBOARD, DashboardRecord, INDEX_PATTERN};
pub use search::{PER_PAGE, expect_one, find, quote, search};
