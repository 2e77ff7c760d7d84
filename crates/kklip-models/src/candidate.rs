//! Selection candidate model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A fixed-identity time window derived from one transcript chunk.
///
/// Candidates are what the packer and the ranking service reason about.
/// The id is stable for the lifetime of a run (`c001`, `c002`, ...) so that
/// ranking responses can reference windows without repeating timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    /// Stable candidate id, 1-based and order-preserving (`c001`, `c002`, ...)
    pub id: String,

    /// Window start in seconds
    pub start: f64,

    /// Window end in seconds
    pub end: f64,

    /// Chunk text backing this window
    pub text: String,
}

impl Candidate {
    /// Format the candidate id for a 1-based ordinal.
    pub fn id_for(ordinal: usize) -> String {
        format!("c{:03}", ordinal)
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_zero_padded() {
        assert_eq!(Candidate::id_for(1), "c001");
        assert_eq!(Candidate::id_for(42), "c042");
        assert_eq!(Candidate::id_for(1234), "c1234");
    }
}
