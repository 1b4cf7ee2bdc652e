//! Errors reported by extension handle callbacks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Extension initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Extension shutdown failed: {0}")]
    ShutdownFailed(String),

    #[error("Extension release failed: {0}")]
    ReleaseFailed(String),

    #[error("Extension I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}
