//! Candidate window derivation.

use kklip_models::{Candidate, TranscriptChunk};

/// Derive fixed-identity candidate windows from ordered transcript chunks.
///
/// One candidate per chunk, ids `c001`, `c002`, ... in chunk order. The
/// window end is clamped to `start + max_seconds`; windows shorter than
/// `min_seconds` are padded out to `start + min_seconds` even past the
/// chunk's real end, so the packer has room to work. True duration bounds
/// are re-enforced by the validator.
///
/// Chunk ordering and non-overlap are assumed, not enforced here.
pub fn build_candidates(
    chunks: &[TranscriptChunk],
    min_seconds: f64,
    max_seconds: f64,
) -> Vec<Candidate> {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let start = chunk.start;
            let mut end = chunk.end.min(start + max_seconds);
            if end - start < min_seconds {
                end = start + min_seconds;
            }
            Candidate {
                id: Candidate::id_for(i + 1),
                start,
                end,
                text: chunk.text.clone(),
            }
        })
        .collect()
}
