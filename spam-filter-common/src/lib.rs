//! Spam Filter Common Types
//!
//! Wire types shared by the gateway, its clients and classifier harnesses.

pub mod health;
pub mod prediction;

pub use health::HealthResponse;
pub use prediction::{PredictionRequest, PredictionResponse};
