use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use tracing::info;

/// GET /health
pub async fn get_health() -> Response {
    info!("GET /health");
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
        .into_response()
}
