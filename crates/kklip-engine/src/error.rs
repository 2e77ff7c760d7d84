//! Engine error types.

use thiserror::Error;

pub type SelectResult<T> = Result<T, SelectError>;

/// Terminal selection failures.
///
/// These are the only two conditions under which a run produces no clips.
/// Ranking failures never appear here; they are absorbed by the heuristic
/// fallback inside the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The transcript yielded no candidate windows
    #[error("Transcript produced no candidate windows")]
    EmptyTranscript,

    /// No clip can reach the minimum duration, even after the overlap
    /// relaxation
    #[error("Candidates cannot satisfy the minimum clip duration")]
    CandidateExhausted,
}
