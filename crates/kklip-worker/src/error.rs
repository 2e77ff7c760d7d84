//! Worker error types.

use thiserror::Error;

use kklip_engine::SelectError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Selection failed: {0}")]
    Selection(#[from] SelectError),

    #[error("Callback failed: {0}")]
    Callback(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn transcript(msg: impl Into<String>) -> Self {
        Self::Transcript(msg.into())
    }

    pub fn callback(msg: impl Into<String>) -> Self {
        Self::Callback(msg.into())
    }
}
