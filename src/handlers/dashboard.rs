use crate::helpers::converters::{panel_from_recomputation, slot_from_spec};
use crate::schemas::{ApiResponse, AppState, DashboardQuery, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{ChartSlot, DashboardPanel};
use compute::ComputeError;
use model::{Metric, Region, Selection};
use tracing::{debug, error, info, instrument, trace, warn};

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Resolves the query against the configured defaults.
fn selection_from_query(state: &AppState, query: &DashboardQuery) -> Result<Selection, HandlerError> {
    let metric = match query.metric.as_deref() {
        Some(raw) => raw.parse::<Metric>().map_err(|e| {
            warn!("Rejecting selection: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e, "INVALID_METRIC")),
            )
        })?,
        None => state.defaults.metric,
    };
    let region = query
        .region
        .as_deref()
        .map(Region::who)
        .unwrap_or_else(|| state.defaults.region.clone());

    Ok(Selection::new(metric, region))
}

/// Recompute every chart slot for a metric/region selection
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Charts recomputed successfully", body = ApiResponse<DashboardPanel>),
        (status = 400, description = "Unknown metric", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardPanel>>, HandlerError> {
    trace!("Entering get_dashboard function");
    let selection = selection_from_query(&state, &query)?;
    let cache_key = selection.key();

    if let Some(panel) = state.cache.get(&cache_key).await {
        debug!("Serving dashboard for {} from cache", cache_key);
        return Ok(Json(ApiResponse::ok(panel, "Charts retrieved from cache")));
    }

    let recomputation = state.binding.recompute(&state.dataset, &selection).await;
    let panel = panel_from_recomputation(&recomputation);

    // Partial panels are recomputed on the next request
    if panel.is_complete() {
        state.cache.insert(cache_key.clone(), panel.clone()).await;
    } else {
        let failed = panel.charts.iter().filter(|c| !c.is_ok()).count();
        warn!("{} of {} slots failed for {}", failed, panel.charts.len(), cache_key);
    }

    info!("Dashboard recomputed for {}", cache_key);
    Ok(Json(ApiResponse::ok(panel, "Charts recomputed successfully")))
}

/// Recompute a single chart slot
#[utoipa::path(
    get,
    path = "/api/v1/charts/{slot}",
    tag = "dashboard",
    params(
        ("slot" = String, Path, description = "Slot id, e.g. `bar-chart` or `map-chart`"),
        DashboardQuery
    ),
    responses(
        (status = 200, description = "Chart recomputed successfully", body = ApiResponse<ChartSlot>),
        (status = 400, description = "Unknown metric", body = ErrorResponse),
        (status = 404, description = "Unknown slot", body = ErrorResponse),
        (status = 500, description = "Chart builder failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<ChartSlot>>, HandlerError> {
    trace!("Entering get_chart function for slot: {}", slot);
    let selection = selection_from_query(&state, &query)?;

    if let Some(panel) = state.cache.get(&selection.key()).await {
        if let Some(chart) = panel.slot(&slot) {
            debug!("Serving slot {} from cached dashboard", slot);
            return Ok(Json(ApiResponse::ok(chart.clone(), "Chart retrieved from cache")));
        }
    }

    match state
        .binding
        .recompute_slot(&state.dataset, &selection, &slot)
        .await
    {
        Ok(spec) => Ok(Json(ApiResponse::ok(
            slot_from_spec(&slot, &spec),
            "Chart recomputed successfully",
        ))),
        Err(ComputeError::UnknownSlot(slot)) => {
            warn!("Unknown chart slot requested: {}", slot);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("Unknown chart slot: {}", slot), "UNKNOWN_SLOT")),
            ))
        }
        Err(e) => {
            error!("Failed to build slot {}: {}", slot, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string(), "BUILDER_ERROR")),
            ))
        }
    }
}
