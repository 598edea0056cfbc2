use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One chart slot of the dashboard after a recomputation.
///
/// Exactly one of `figure` and `error` is set: a slot whose builder failed
/// carries the message instead of a chart, and the other slots are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartSlot {
    /// DOM id of the slot, e.g. `bar-chart`
    pub slot: String,
    /// Chart kind, e.g. `bar` or `geo-scatter`
    pub kind: String,
    /// Plotly figure (`{"data": [...], "layout": {...}}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub figure: Option<serde_json::Value>,
    /// Builder failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChartSlot {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Every chart for one metric/region selection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardPanel {
    /// Selected metric column
    pub metric: String,
    /// Selected WHO region, or `Global`
    pub region: String,
    /// Chart slots in page layout order
    pub charts: Vec<ChartSlot>,
}

impl DashboardPanel {
    pub fn slot(&self, slot: &str) -> Option<&ChartSlot> {
        self.charts.iter().find(|chart| chart.slot == slot)
    }

    pub fn is_complete(&self) -> bool {
        self.charts.iter().all(ChartSlot::is_ok)
    }
}

/// Choices offered by the two dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SelectionOptions {
    /// Metric columns, in dropdown order
    pub metrics: Vec<String>,
    /// `Global` followed by every WHO region present in the dataset
    pub regions: Vec<String>,
    pub default_metric: String,
    pub default_region: String,
}
