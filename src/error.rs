//! Error types for Parley

use thiserror::Error;

/// Result type alias for Parley operations
pub type Result<T> = std::result::Result<T, ParleyError>;

/// Main error type for Parley
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParleyError {
    /// Check if the error stems from malformed caller input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ParleyError::Validation(_) | ParleyError::Config(_))
    }

    /// Short machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ParleyError::Validation(_) => "validation",
            ParleyError::Config(_) => "config",
            ParleyError::Serialization(_) => "serialization",
            ParleyError::Io(_) => "io",
        }
    }
}
