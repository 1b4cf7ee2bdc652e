//! Errors raised by capability providers and the capabilities they create.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Argument mismatch: expected {expected} arguments, got {actual}")]
    ArgumentMismatch { expected: usize, actual: usize },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}
