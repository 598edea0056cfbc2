//! Common transport-layer types shared between the server and its clients.
//! These structs mirror the JSON payloads of the dashboard API so a client
//! can deserialize responses without duplicating shapes.

mod dashboard;
mod summary;

pub use dashboard::{ChartSlot, DashboardPanel, SelectionOptions};
pub use summary::{SummaryCard, SummaryCards};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
