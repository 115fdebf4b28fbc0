//! Error types for the tally-core library.
//!
//! Field extraction itself never fails; missing fields degrade to sentinel
//! values. These errors cover the boundaries around it: configuration and
//! batch (de)serialization.

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Batch contents could not be read back.
    #[error("batch error: {0}")]
    Batch(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
