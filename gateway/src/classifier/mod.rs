//! Classifier abstraction layer.
//!
//! This module defines the `Classifier` trait the prediction endpoint talks
//! to. The production implementation runs an external program per request.

mod subprocess;

pub use subprocess::SubprocessClassifier;

use async_trait::async_trait;
use spam_filter_common::PredictionResponse;

use crate::error::Result;

/// Something that turns email text into a spam verdict.
///
/// Implementations must not keep per-request state: concurrent calls are
/// independent and each result belongs to its own input only.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier used in logs (e.g., "subprocess").
    fn name(&self) -> &'static str;

    /// Classify one email. The returned verdict is passed to the client as is.
    async fn classify(&self, email_text: &str) -> Result<PredictionResponse>;
}
