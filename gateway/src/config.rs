//! Configuration for the spam filter gateway.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// External classifier invocation.
///
/// The classifier is run as `<program> <args...> <email_text>` from
/// `work_dir`, once per prediction request.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Program to execute (interpreter or standalone binary).
    #[serde(default = "default_program")]
    pub program: String,
    /// Fixed arguments placed before the email text, e.g. the script name.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Working directory holding the classifier script and its model files.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    /// Maximum number of classifier processes running at once. Unset = unlimited.
    #[serde(default)]
    pub max_concurrent: Option<usize>,
    /// Kill the classifier after this many seconds. Unset = wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Kill the classifier when the client goes away before it finishes.
    #[serde(default)]
    pub kill_on_disconnect: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            work_dir: default_work_dir(),
            max_concurrent: None,
            timeout_secs: None,
            kill_on_disconnect: false,
        }
    }
}

/// Static frontend directory.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_assets_dir")]
    pub dir: String,
    /// Used when `dir` does not exist at startup.
    #[serde(default = "default_assets_fallback_dir")]
    pub fallback_dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            fallback_dir: default_assets_fallback_dir(),
        }
    }
}

impl AssetsConfig {
    /// Pick the directory to serve: `dir` if it exists, otherwise `fallback_dir`.
    pub fn resolve(&self) -> PathBuf {
        let primary = Path::new(&self.dir);
        if primary.exists() {
            primary.to_path_buf()
        } else {
            tracing::debug!(
                "Asset directory {} not found, falling back to {}",
                self.dir,
                self.fallback_dir
            );
            PathBuf::from(&self.fallback_dir)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
#[cfg(windows)]
fn default_program() -> String {
    "python".to_string()
}
#[cfg(not(windows))]
fn default_program() -> String {
    "python3".to_string()
}
fn default_args() -> Vec<String> {
    vec!["predict.py".to_string()]
}
fn default_work_dir() -> String {
    ".".to_string()
}
fn default_assets_dir() -> String {
    "./frontend".to_string()
}
fn default_assets_fallback_dir() -> String {
    "../frontend".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (GATEWAY__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("classifier.program", default_program())?
            .add_source(File::with_name("config").required(false))
            // GATEWAY__CLASSIFIER__ARGS is split on spaces
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("classifier.args")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
