//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse timeline file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown view mode '{0}' (expected day, week or month)")]
    UnknownViewMode(String),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
