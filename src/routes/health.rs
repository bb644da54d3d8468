use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "OK",
        "timestamp": crate::utils::time::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body))
}
