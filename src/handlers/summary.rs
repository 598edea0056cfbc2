use crate::helpers::converters::summary_cards;
use crate::schemas::{ApiResponse, AppState, SummaryQuery};
use axum::{
    extract::{Query, State},
    response::Json,
};
use common::SummaryCards;
use compute::summarize;
use model::Region;
use tracing::{debug, instrument, trace, warn};

/// Headline totals of confirmed cases, deaths and recoveries
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "options",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Summary retrieved successfully", body = ApiResponse<SummaryCards>)
    )
)]
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Json<ApiResponse<SummaryCards>> {
    trace!("Entering get_summary function");
    let region = query
        .region
        .map(Region::who)
        .unwrap_or_else(|| state.defaults.region.clone());

    if !region.is_global() && !state.dataset.has_region(region.as_str()) {
        warn!("Summary requested for region '{}' with no rows", region);
    }

    let summary = summarize(&state.dataset, &region);
    debug!(
        "Summary for {}: {} countries, {} confirmed",
        summary.region, summary.countries, summary.confirmed
    );

    Json(ApiResponse::ok(
        summary_cards(&summary, state.dataset.loaded_at()),
        "Summary retrieved successfully",
    ))
}
