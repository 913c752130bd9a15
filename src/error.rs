//! Error type for the layers around the calculation engine
//!
//! The calculators themselves are infallible arithmetic. Errors only arise
//! where the engine meets the outside world: loading profiles, persisting
//! snapshots and validating caller input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid profile: {field} {reason}")]
    InvalidProfile { field: &'static str, reason: String },

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Invalid {field}: {value:?}")]
    InvalidChoice { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
