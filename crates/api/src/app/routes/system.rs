use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;

/// Liveness probe: always 200 with the current server time.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "timestamp": Utc::now().to_rfc3339() })),
    )
}
