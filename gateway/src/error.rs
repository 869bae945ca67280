//! Error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use spam_filter_common::PredictionResponse;

/// Everything that can go wrong while serving a prediction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request body is not a JSON object matching `PredictionRequest`.
    #[error("Invalid request body")]
    InvalidRequestBody(#[source] serde_json::Error),

    #[error("Email text cannot be empty")]
    EmptyInput,

    /// Classifier could not be started, exited non-zero or timed out.
    #[error("prediction failed: {0}")]
    Execution(String),

    /// Classifier exited cleanly but stdout was not a prediction document.
    #[error("failed to parse prediction: {0}")]
    OutputDecode(#[source] serde_json::Error),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl Error {
    /// Validation failures answer 200 with an error body; callers have to
    /// inspect `error` rather than the status code.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidRequestBody(_) | Error::EmptyInput => StatusCode::OK,
            Error::Execution(_) | Error::OutputDecode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Prediction failed: {}", self);
        } else {
            tracing::debug!("Rejected prediction request: {}", self);
        }

        (status, Json(PredictionResponse::failure(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
