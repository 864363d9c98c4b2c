use thiserror::Error;

/// Error type that captures import and persistence failures.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid import payload: {0}")]
    InvalidImport(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
