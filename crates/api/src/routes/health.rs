//! Health check endpoint.

use axum::Json;

use super::StatusResponse;

/// GET /health — returns liveness status.
pub async fn check() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
