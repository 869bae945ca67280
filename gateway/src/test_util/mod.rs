//! Helpers shared by unit and integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use spam_filter_common::PredictionResponse;

use crate::classifier::Classifier;
use crate::config::{ClassifierConfig, Config};
use crate::error::{Error, Result};
use crate::state::AppState;

/// Classifier config that runs `script` through `sh -c`.
///
/// The email text arrives as `$1`.
pub fn shell_config(script: &str) -> ClassifierConfig {
    ClassifierConfig {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string(), "classifier".to_string()],
        ..ClassifierConfig::default()
    }
}

/// Test configuration pointing at a shell classifier and a missing asset dir.
pub fn test_config(classifier: ClassifierConfig) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.classifier = classifier;
    config.assets.dir = "/nonexistent/frontend".to_string();
    config.assets.fallback_dir = "/nonexistent/fallback".to_string();
    config
}

pub fn test_state(classifier: Arc<dyn Classifier>) -> Arc<AppState> {
    Arc::new(AppState::new(
        test_config(ClassifierConfig::default()),
        classifier,
    ))
}

/// In-process classifier that records every call.
///
/// Echoes the input back as the label, or fails with an execution error
/// when built with [`RecordingClassifier::failing`].
#[derive(Default)]
pub struct RecordingClassifier {
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl RecordingClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for RecordingClassifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn classify(&self, email_text: &str) -> Result<PredictionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(email_text.to_string());

        match self.failure {
            Some(ref message) => Err(Error::Execution(message.clone())),
            None => Ok(PredictionResponse::verdict(true, 0.5, email_text)),
        }
    }
}
