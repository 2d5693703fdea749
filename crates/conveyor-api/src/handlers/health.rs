//! Liveness handler.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness probe - process is running.
///
/// Deliberately independent of the storage handle so it stays green during
/// provider outages.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}
