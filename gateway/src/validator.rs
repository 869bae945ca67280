//! Request validation for `POST /api/predict`.

use spam_filter_common::PredictionRequest;

use crate::error::{Error, Result};

/// Decode a raw request body and return the email text to classify.
///
/// Only the first JSON value in the body is read; anything after it is
/// ignored. A `null` body counts as a request without text. The returned
/// text is the original, untrimmed input.
pub fn validate(body: &[u8]) -> Result<String> {
    let request: PredictionRequest = serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<PredictionRequest>>()
        .next()
        .unwrap_or_else(|| serde_json::from_slice::<Option<PredictionRequest>>(body))
        .map_err(Error::InvalidRequestBody)?
        .unwrap_or_default();

    if request.is_blank() {
        return Err(Error::EmptyInput);
    }

    Ok(request.email_text)
}
