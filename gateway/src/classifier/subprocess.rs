//! External process classifier.
//!
//! Runs the configured program once per request with the email text as the
//! last positional argument and decodes the JSON document it prints on
//! stdout. The child is awaited asynchronously, so a slow classifier only
//! holds up its own request.

use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use spam_filter_common::PredictionResponse;
use tokio::process::Command;
use tokio::sync::{Semaphore, SemaphorePermit};

use super::Classifier;
use crate::config::ClassifierConfig;
use crate::error::{Error, Result};

/// Longest stderr excerpt written to the log for a failed run.
const STDERR_LOG_LIMIT: usize = 2048;

/// Classifier backed by an external program.
pub struct SubprocessClassifier {
    config: ClassifierConfig,
    /// Limits concurrently running classifiers when `max_concurrent` is set.
    permits: Option<Semaphore>,
}

impl SubprocessClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            permits: config.max_concurrent.filter(|&n| n > 0).map(Semaphore::new),
            config,
        }
    }

    fn command(&self, email_text: &str) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(email_text)
            .current_dir(&self.config.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed out child is dropped mid-wait and must not outlive it.
            .kill_on_drop(self.config.kill_on_disconnect || self.config.timeout_secs.is_some());
        cmd
    }

    async fn acquire(&self) -> Result<Option<SemaphorePermit<'_>>> {
        match self.permits {
            Some(ref permits) => permits
                .acquire()
                .await
                .map(Some)
                .map_err(|_| Error::Execution("classifier pool closed".to_string())),
            None => Ok(None),
        }
    }

    /// Spawn the classifier and collect its output.
    async fn run(&self, email_text: &str) -> Result<Output> {
        let child = self.command(email_text).spawn().map_err(|e| {
            Error::Execution(format!(
                "failed to start {} in {}: {}",
                self.config.program, self.config.work_dir, e
            ))
        })?;
        tracing::debug!(pid = ?child.id(), program = %self.config.program, "Classifier started");

        let output = match self.config.timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output())
                .await
                .map_err(|_| Error::Execution(format!("timed out after {}s", secs)))?,
            None => child.wait_with_output().await,
        };

        output.map_err(|e| Error::Execution(e.to_string()))
    }
}

#[async_trait]
impl Classifier for SubprocessClassifier {
    fn name(&self) -> &'static str {
        "subprocess"
    }

    async fn classify(&self, email_text: &str) -> Result<PredictionResponse> {
        let _permit = self.acquire().await?;

        let started = Instant::now();
        let output = self.run(email_text).await?;
        let elapsed_ms = started.elapsed().as_millis();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let excerpt: String = stderr.trim().chars().take(STDERR_LOG_LIMIT).collect();
            tracing::warn!(
                status = %output.status,
                elapsed_ms = %elapsed_ms,
                stderr = %excerpt,
                "Classifier exited unsuccessfully"
            );
            return Err(Error::Execution(output.status.to_string()));
        }

        tracing::debug!(
            elapsed_ms = %elapsed_ms,
            stdout_bytes = output.stdout.len(),
            "Classifier finished"
        );

        serde_json::from_slice(&output.stdout).map_err(Error::OutputDecode)
    }
}
