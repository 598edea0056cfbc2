use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A headline total, e.g. "Global Confirmed".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SummaryCard {
    pub label: String,
    pub value: i64,
    /// Value with thousands separators
    pub display: String,
}

/// The summary cards shown above the charts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SummaryCards {
    pub region: String,
    pub countries: usize,
    pub cards: Vec<SummaryCard>,
    /// When the dataset was loaded
    pub as_of: DateTime<Utc>,
}
