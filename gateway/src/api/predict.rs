//! Prediction endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use spam_filter_common::PredictionResponse;

use super::method_not_allowed;
use crate::error::Result;
use crate::state::AppState;
use crate::validator;

/// Build the prediction router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/predict",
        post(predict).options(preflight).fallback(method_not_allowed),
    )
}

/// POST /api/predict - classify one email.
///
/// The body is read as raw bytes so a missing or wrong `Content-Type` still
/// reaches validation instead of being rejected by an extractor.
async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResponse>> {
    let email_text = validator::validate(&body)?;

    tracing::debug!(
        classifier = state.classifier.name(),
        chars = email_text.chars().count(),
        "Classifying email"
    );

    let verdict = state.classifier.classify(&email_text).await?;
    Ok(Json(verdict))
}

/// OPTIONS /api/predict - CORS preflight, answered without touching the body.
async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")])
}
