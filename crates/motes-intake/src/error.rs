//! Error types for the intake.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    /// A required field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results from intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;
