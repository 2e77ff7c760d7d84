//! Transcript models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single timed caption line, as produced by caption download or ASR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptEntry {
    /// Caption text
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A merged run of transcript entries covering a contiguous time window.
///
/// Chunks are the unit the selection engine reasons about. They are produced
/// externally (by the transcript ingestion step) and assumed ordered and
/// non-overlapping; the engine does not re-check that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptChunk {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds (start < end)
    pub end: f64,

    /// Merged caption text
    pub text: String,
}

impl TranscriptChunk {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}
