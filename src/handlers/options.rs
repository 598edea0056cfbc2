use crate::helpers::converters::selection_options;
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, response::Json};
use common::SelectionOptions;
use tracing::{debug, instrument, trace};

/// Dropdown choices: every metric column, and `Global` plus each WHO region
/// present in the dataset.
#[utoipa::path(
    get,
    path = "/api/v1/options",
    tag = "options",
    responses(
        (status = 200, description = "Selection options retrieved successfully", body = ApiResponse<SelectionOptions>)
    )
)]
#[instrument(skip(state))]
pub async fn get_options(State(state): State<AppState>) -> Json<ApiResponse<SelectionOptions>> {
    trace!("Entering get_options function");
    let options = selection_options(&state.dataset, &state.defaults);
    debug!(
        "Offering {} metrics and {} regions",
        options.metrics.len(),
        options.regions.len()
    );

    Json(ApiResponse::ok(options, "Selection options retrieved successfully"))
}
