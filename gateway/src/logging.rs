//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Middleware that logs HTTP requests at INFO level.
///
/// Everything logged while handling the request, classifier output
/// included, is attached to a span carrying a fresh request id.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4();

    let span = tracing::info_span!("request", id = %request_id);
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration = start.elapsed();

    span.in_scope(|| {
        tracing::info!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "HTTP request"
        );
    });

    response
}
