//! Health check endpoint.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use spam_filter_common::HealthResponse;

use super::method_not_allowed;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health).fallback(method_not_allowed))
}

/// GET /api/health - Liveness only; the classifier is never probed.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
