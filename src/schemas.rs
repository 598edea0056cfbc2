use common::{ChartSlot, DashboardPanel, SelectionOptions, SummaryCard, SummaryCards};
use compute::Binding;
use model::{Dataset, Selection};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The dataset, loaded once at startup
    pub dataset: Dataset,
    /// Chart slots bound to the selection
    pub binding: Arc<Binding>,
    /// Assembled panels keyed by selection
    pub cache: Cache<String, DashboardPanel>,
    /// Selection used when a request leaves a control unset
    pub defaults: Selection,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("rows", &self.dataset.len())
            .field("source", &self.dataset.source())
            .field("slots", &self.binding.subscriptions().len())
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Query parameters selecting what the charts show
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Metric column, e.g. `Deaths` or `New cases`
    pub metric: Option<String>,
    /// WHO region, or `Global` for every country
    pub region: Option<String>,
}

/// Query parameters for the summary cards
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// WHO region, or `Global` for every country
    pub region: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of rows in the loaded dataset
    pub dataset_rows: usize,
    /// `idle` or `recomputing`
    pub binding_state: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::options::get_options,
        crate::handlers::summary::get_summary,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::get_chart,
    ),
    components(
        schemas(
            ApiResponse<DashboardPanel>,
            ApiResponse<ChartSlot>,
            ApiResponse<SelectionOptions>,
            ApiResponse<SummaryCards>,
            ErrorResponse,
            HealthResponse,
            DashboardQuery,
            SummaryQuery,
            DashboardPanel,
            ChartSlot,
            SelectionOptions,
            SummaryCards,
            SummaryCard,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Chart recomputation endpoints"),
        (name = "options", description = "Dropdown choices and summary cards"),
    ),
    info(
        title = "pandash API",
        description = "Pandemic statistics dashboard: per-country counts filtered by WHO region and rendered as Plotly charts",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
