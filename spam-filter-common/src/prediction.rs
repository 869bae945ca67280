//! Prediction request/response types.
//!
//! `PredictionResponse` is both the gateway's reply and the document the
//! external classifier prints on stdout.

use serde::{Deserialize, Deserializer, Serialize};

/// Inbound body of `POST /api/predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Raw email text. A missing or `null` field decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email_text: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PredictionRequest {
    pub fn new(email_text: impl Into<String>) -> Self {
        Self {
            email_text: email_text.into(),
        }
    }

    /// True when the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.email_text.trim().is_empty()
    }
}

/// Classifier verdict, or an error with zeroed verdict fields.
///
/// Verdict fields are always serialized, even next to `error`; the gateway
/// never sanitizes them. Missing fields in classifier output default to
/// their zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub is_spam: bool,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResponse {
    /// Build a verdict without error.
    pub fn verdict(is_spam: bool, confidence: f64, label: impl Into<String>) -> Self {
        Self {
            is_spam,
            confidence,
            label: label.into(),
            error: None,
        }
    }

    /// Build an error response. Verdict fields keep their zero values.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
