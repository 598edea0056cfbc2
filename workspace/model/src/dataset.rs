use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::record::Record;

/// Immutable, ordered snapshot of every record read from the source file.
///
/// Cloning is cheap: the rows live behind an `Arc` and are never mutated
/// after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Wraps already-parsed records. Row order is preserved as given.
    pub fn new(records: Vec<Record>, source: impl Into<PathBuf>) -> Self {
        Self {
            records: records.into(),
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Builds a dataset that did not come from a file (tests, fixtures).
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(records, PathBuf::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct WHO regions in order of first appearance.
    pub fn regions(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| seen.insert(record.who_region.as_str()))
            .map(|record| record.who_region.clone())
            .collect()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.records.iter().any(|record| record.who_region == region)
    }
}
