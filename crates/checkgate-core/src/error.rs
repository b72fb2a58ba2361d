//! Error types for gate evaluation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("{} upstream check(s) failed: {}", failures.len(), failures.join("; "))]
    UpstreamFailure { failures: Vec<String> },

    #[error("Invalid needs context: {0}")]
    InvalidNeeds(serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Job '{0}' is not present in the needs context")]
    MissingJob(String),

    #[error("Invalid check '{0}': expected <job>=<label>")]
    InvalidCheck(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
