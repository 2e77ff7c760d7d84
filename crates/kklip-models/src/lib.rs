//! Shared data models for the KangKlip backend.
//!
//! This crate provides Serde-serializable types for:
//! - Timed transcript entries and merged transcript chunks
//! - Selection candidates (fixed-identity time windows)
//! - Clip segments and finished clips
//! - Selection provenance (ranked vs. heuristic)

pub mod candidate;
pub mod clip;
pub mod selection;
pub mod transcript;

// Re-export common types
pub use candidate::Candidate;
pub use clip::{Clip, Segment};
pub use selection::{SelectionMode, SelectionProvenance};
pub use transcript::{TranscriptChunk, TranscriptEntry};
