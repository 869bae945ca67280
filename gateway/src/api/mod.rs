//! HTTP API: prediction, health, and the static frontend fallback.

pub mod health;
pub mod predict;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::Error;
use crate::logging;
use crate::state::AppState;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Build the `/api` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(predict::router())
        .merge(health::router())
}

/// Method fallback for API routes, answered with a JSON error body.
async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// Build the complete application.
///
/// Unknown paths fall through to the asset directory resolved from config.
/// Every response, static files included, carries the CORS headers.
pub fn app(state: Arc<AppState>) -> Router {
    let assets = state.config.assets.resolve();
    tracing::info!("Serving static assets from {}", assets.display());

    Router::new()
        .nest("/api", router())
        .fallback_service(ServeDir::new(assets))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .with_state(state)
}
