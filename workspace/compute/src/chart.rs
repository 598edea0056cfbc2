//! Chart specifications and the builders that produce them.
//!
//! Builders assemble a [`plotly::Plot`] from the selected rows and hand its
//! figure JSON to the browser, which draws it with plotly.js. Binning and
//! axis scaling stay with the renderer.

pub mod bar;
pub mod geo;
pub mod histogram;
pub mod line;
pub mod pie;
pub mod scatter;

use model::{Record, Selection};
use plotly::common::Title;
use plotly::{Layout, Plot};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::filter::Subset;

pub use bar::BarChart;
pub use geo::GeoScatterChart;
pub use histogram::HistogramChart;
pub use line::LineChart;
pub use pie::PieChart;
pub use scatter::{BubbleChart, ScatterChart};

/// Number of rows kept by the ranked (bar and line) charts.
pub const TOP_COUNTRIES: usize = 15;

/// Plotly's Dark2 qualitative colour sequence.
pub const DARK2: [&str; 8] = [
    "rgb(27,158,119)",
    "rgb(217,95,2)",
    "rgb(117,112,179)",
    "rgb(231,41,138)",
    "rgb(102,166,30)",
    "rgb(230,171,2)",
    "rgb(166,118,29)",
    "rgb(102,102,102)",
];

/// The kinds of visualisation the dashboard shows, one per layout slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Scatter,
    Bubble,
    Histogram,
    GeoScatter,
}

impl ChartKind {
    /// Every kind, in page layout order.
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Bubble,
        ChartKind::Histogram,
        ChartKind::GeoScatter,
    ];

    /// DOM id of the slot this kind is displayed in.
    pub fn slot_id(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar-chart",
            ChartKind::Pie => "pie-chart",
            ChartKind::Line => "line-chart",
            ChartKind::Scatter => "scatter-chart",
            ChartKind::Bubble => "bubble-chart",
            ChartKind::Histogram => "histogram-chart",
            ChartKind::GeoScatter => "map-chart",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Bubble => "bubble",
            ChartKind::Histogram => "histogram",
            ChartKind::GeoScatter => "geo-scatter",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A builder could not produce a spec. Only the builder's own slot is affected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} chart could not be built: {message}")]
pub struct BuilderError {
    pub kind: ChartKind,
    pub message: String,
}

impl BuilderError {
    pub fn new(kind: ChartKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Maps the selected rows to one chart. Implementations must be pure: the
/// same subset and selection always yield the same spec.
pub trait ChartBuilder: Send + Sync {
    fn kind(&self) -> ChartKind;

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError>;
}

/// Returns the standard builder for a chart kind.
pub fn builder_for(kind: ChartKind) -> Arc<dyn ChartBuilder> {
    match kind {
        ChartKind::Bar => Arc::new(BarChart),
        ChartKind::Pie => Arc::new(PieChart),
        ChartKind::Line => Arc::new(LineChart),
        ChartKind::Scatter => Arc::new(ScatterChart),
        ChartKind::Bubble => Arc::new(BubbleChart),
        ChartKind::Histogram => Arc::new(HistogramChart),
        ChartKind::GeoScatter => Arc::new(GeoScatterChart),
    }
}

/// Declarative description of one chart: the Plotly figure JSON
/// (`{"data": [...], "layout": {...}}`) produced from a [`Plot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub figure: Value,
}

impl ChartSpec {
    /// Encodes a plot's traces and layout. The plot's configuration block is
    /// left to the page.
    pub fn from_plot(kind: ChartKind, plot: &Plot) -> Result<Self, BuilderError> {
        let mut encoded = match serde_json::to_value(plot) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(BuilderError::new(
                    kind,
                    format!("plot encoded as {other} instead of an object"),
                ));
            }
            Err(e) => return Err(BuilderError::new(kind, format!("cannot encode plot: {e}"))),
        };

        let figure = json!({
            "data": encoded.remove("data").unwrap_or_else(|| json!([])),
            "layout": encoded.remove("layout").unwrap_or_else(|| json!({})),
        });
        Ok(Self { kind, figure })
    }

    /// Sets a layout attribute the plot's `Layout` does not model.
    pub fn with_layout(mut self, key: &str, value: impl Serialize) -> Result<Self, BuilderError> {
        let value = serde_json::to_value(value)
            .map_err(|e| BuilderError::new(self.kind, format!("cannot encode layout.{key}: {e}")))?;
        if let Some(layout) = self.figure.get_mut("layout").and_then(Value::as_object_mut) {
            layout.insert(key.to_string(), value);
        }
        Ok(self)
    }

    pub fn title(&self) -> &str {
        self.figure["layout"]["title"]["text"]
            .as_str()
            .unwrap_or_default()
    }

    pub fn traces(&self) -> &[Value] {
        self.figure["data"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of data points across every trace.
    pub fn point_count(&self) -> usize {
        self.traces()
            .iter()
            .map(|trace| {
                ["x", "labels", "locations"]
                    .iter()
                    .find_map(|key| trace[*key].as_array())
                    .map_or(0, Vec::len)
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// Layout shared by every chart: the title and the Dark2 colour sequence,
/// which plotly.js also uses for pie slices.
pub fn base_layout(title: &str) -> Layout {
    Layout::new()
        .title(Title::with_text(title))
        .colorway(DARK2.to_vec())
}

/// Splits rows into colour groups keyed by `key`, in order of first appearance.
pub fn group_by<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    key: impl Fn(&Record) -> &str,
) -> Vec<(String, Vec<&'a Record>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a Record>)> = Vec::new();
    for record in records {
        let name = key(record);
        match index.get(name) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(name.to_string(), groups.len());
                groups.push((name.to_string(), vec![record]));
            }
        }
    }
    groups
}

/// Marker diameters in pixels with the largest value drawn at `size_max`
/// and areas proportional to the values. Non-positive values get size 0.
pub fn bubble_sizes(values: &[i64], size_max: f64) -> Vec<usize> {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&value| {
            if value <= 0 || max <= 0 {
                0
            } else {
                (size_max * (value as f64 / max as f64).sqrt()).round() as usize
            }
        })
        .collect()
}
