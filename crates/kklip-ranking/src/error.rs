//! Ranking client error types.

use thiserror::Error;

pub type RankingResult<T> = Result<T, RankingError>;

/// Errors returned by the ranking client.
///
/// Both variants are recoverable; the selection engine treats them the same
/// way (fall back to the heuristic path) but they are logged distinctly.
#[derive(Debug, Error)]
pub enum RankingError {
    /// Transport failure or timeout talking to the service
    #[error("Ranking service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but the payload did not match the schema
    #[error("Ranking response malformed: {0}")]
    Malformed(String),
}

impl RankingError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
