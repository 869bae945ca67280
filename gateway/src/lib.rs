//! Spam filter gateway - validates email text over HTTP and delegates
//! classification to an external process.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod test_util;
pub mod validator;

pub use api::app;
pub use classifier::{Classifier, SubprocessClassifier};
pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
