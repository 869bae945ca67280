//! Shared application state.

use std::sync::Arc;

use crate::classifier::Classifier;
use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// Read-only after startup; requests never share anything through it.
pub struct AppState {
    pub config: Config,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(config: Config, classifier: Arc<dyn Classifier>) -> Self {
        Self { config, classifier }
    }
}
