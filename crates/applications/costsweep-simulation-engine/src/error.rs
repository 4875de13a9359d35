//! Error types for the cost sweep

use thiserror::Error;

/// Cost sweep result type
pub type Result<T> = std::result::Result<T, CostError>;

/// Errors that can occur while generating, pricing, or comparing scenarios
#[derive(Error, Debug)]
pub enum CostError {
    /// An input that must be positive (or finite) was not
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A quantity with no meaningful value, e.g. savings relative to a zero cost
    #[error("Undefined: {0}")]
    Undefined(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CostError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an undefined-result error
    pub fn undefined(msg: impl Into<String>) -> Self {
        Self::Undefined(msg.into())
    }
}
