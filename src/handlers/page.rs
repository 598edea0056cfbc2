use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// The dashboard page: two dropdowns, the summary cards and seven chart slots
/// rendered client-side from `/api/v1/dashboard`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
