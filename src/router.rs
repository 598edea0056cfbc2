use crate::handlers::{
    dashboard::{get_chart, get_dashboard},
    health::health_check,
    options::get_options,
    page::index,
    summary::get_summary,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(index))
        // Health check
        .route("/health", get(health_check))
        // Dropdown choices and summary cards
        .route("/api/v1/options", get(get_options))
        .route("/api/v1/summary", get(get_summary))
        // Chart recomputation
        .route("/api/v1/dashboard", get(get_dashboard))
        .route("/api/v1/charts/:slot", get(get_chart))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
