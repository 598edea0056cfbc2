//! Domain model for the pandemic statistics dashboard.
//!
//! The dataset is a single snapshot of per-country counts, loaded once from CSV
//! and shared read-only for the lifetime of the process.

pub mod dataset;
pub mod loader;
pub mod record;
pub mod selection;

pub use dataset::Dataset;
pub use loader::{load, LoadError, REQUIRED_COLUMNS};
pub use record::{Metric, Record};
pub use selection::{Region, Selection, GLOBAL_REGION};

// Re-export tracing for use in this crate
pub use tracing;
