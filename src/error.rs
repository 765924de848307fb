// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed for {request}: {reason}")]
    Fetch {
        request: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("Response parse error in {context}: {message}")]
    Parse { context: String, message: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScanError {
    /// Status code of the failed request, when the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ScanError::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}
