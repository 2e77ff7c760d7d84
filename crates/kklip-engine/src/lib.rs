//! Highlight segment selection and packing engine.
//!
//! Turns ordered transcript chunks into an ordered list of clips, each
//! composed of one or more time segments, under hard per-clip duration
//! bounds and non-overlap guarantees. The external ranking call is optional:
//! every ranking failure degrades to a deterministic local heuristic.
//!
//! Apart from the awaited ranking call, everything here is pure and
//! CPU-bound; identical inputs produce identical clip lists. The engine
//! holds no state between runs.

pub mod candidates;
pub mod error;
pub mod packer;
pub mod reindex;
pub mod select;
pub mod validate;

pub use candidates::build_candidates;
pub use error::{SelectError, SelectResult};
pub use packer::{pack_clip_segments, PackState};
pub use reindex::reindex_clips;
pub use select::{select_clips, SelectionOutcome, SelectionRequest};
pub use validate::{finalize_clips, normalize_segments};
