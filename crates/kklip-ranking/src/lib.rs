//! Client for the external clip ranking service.
//!
//! The ranking service receives the candidate windows for a job and returns
//! an ordered list of selection items (title, hook, and candidate or window
//! references). Every failure mode here is recoverable: the selection engine
//! falls back to its deterministic heuristic when the call cannot be used.

pub mod client;
pub mod error;
pub mod wire;

pub use client::{HttpRankingClient, RankingClient};
pub use error::{RankingError, RankingResult};
pub use wire::{RankingRequest, SegmentRef, SelectionItem};
