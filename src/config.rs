use anyhow::Result;
use compute::{default_binding, Binding};
use model::{Dataset, Metric, Region, Selection};
use moka::future::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::schemas::AppState;

pub const DEFAULT_DATA_PATH: &str = "country_wise_latest.csv";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8050";

/// Runtime configuration, assembled from CLI flags and their environment
/// fallbacks.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub bind_address: String,
    pub default_metric: Metric,
    pub default_region: Region,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_metric: Metric::Confirmed,
            default_region: Region::Global,
            cache_capacity: 256,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl AppConfig {
    pub fn default_selection(&self) -> Selection {
        Selection::new(self.default_metric, self.default_region.clone())
    }
}

/// Load the dataset and build the application state
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Loading dataset from {}", config.data_path.display());
    let path = config.data_path.clone();
    let dataset = tokio::task::spawn_blocking(move || model::load(&path)).await??;

    Ok(build_app_state(dataset, config))
}

/// Build application state around an already loaded dataset
pub fn build_app_state(dataset: Dataset, config: &AppConfig) -> AppState {
    build_app_state_with_binding(dataset, default_binding(), config)
}

/// Build application state with a caller-supplied set of chart slots
pub fn build_app_state_with_binding(dataset: Dataset, binding: Binding, config: &AppConfig) -> AppState {
    let cache = Cache::builder()
        .max_capacity(config.cache_capacity)
        .time_to_live(config.cache_ttl)
        .build();

    AppState {
        dataset,
        binding: Arc::new(binding),
        cache,
        defaults: config.default_selection(),
    }
}
