//! Greedy segment packing.

use std::collections::HashSet;

use kklip_models::{Candidate, Segment};

use crate::validate::{normalize_segments, DURATION_EPSILON};

/// Quantize a window to a millisecond key for the claimed-window set.
fn window_key(start: f64, end: f64) -> (i64, i64) {
    ((start * 1000.0).round() as i64, (end * 1000.0).round() as i64)
}

/// Mutable packing state shared across every clip in one pass.
///
/// The cursor advances monotonically through the candidate stream: a
/// candidate examined for one clip, accepted or not, is never reconsidered
/// by a later clip. This bounds a whole extension pass to O(candidates)
/// and keeps clips moving forward in source time.
#[derive(Debug, Clone, Default)]
pub struct PackState {
    cursor: usize,
    used: HashSet<(i64, i64)>,
    allow_overlap: bool,
    relaxed: bool,
}

impl PackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position into the candidate stream.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor forward to `at`; never moves it backward.
    pub fn advance_to(&mut self, at: usize) {
        self.cursor = self.cursor.max(at);
    }

    /// Claim a window so strict packing will not reuse it.
    pub fn claim(&mut self, start: f64, end: f64) {
        self.used.insert(window_key(start, end));
    }

    /// Whether a window has already been claimed.
    pub fn is_claimed(&self, start: f64, end: f64) -> bool {
        self.used.contains(&window_key(start, end))
    }

    /// Whether cross-clip window reuse is currently permitted.
    pub fn allow_overlap(&self) -> bool {
        self.allow_overlap
    }

    /// Whether the one-shot relaxation is still available.
    pub fn can_relax(&self) -> bool {
        !self.allow_overlap && !self.relaxed
    }

    /// Apply the best-effort relaxation: clear claims, rewind the cursor,
    /// and permit cross-clip reuse. Available at most once per run.
    pub fn relax(&mut self) {
        self.used.clear();
        self.cursor = 0;
        self.allow_overlap = true;
        self.relaxed = true;
    }

    /// Rewind for a from-scratch restart while keeping the relaxation
    /// budget already spent in this run.
    pub fn reset_for_restart(&mut self) {
        self.used.clear();
        self.cursor = 0;
    }
}

/// Fill one clip's segment list toward `max_seconds`.
///
/// Scans candidates forward from the shared cursor, skipping claimed
/// windows (unless overlap is allowed), windows starting before the clip's
/// running end, and degenerate windows. An accepted candidate may be
/// truncated so the running total never exceeds `max_seconds`.
///
/// Returns the packed segments, or an empty list when the clip cannot reach
/// `min_seconds`. Even then the cursor ends up past every examined
/// candidate, so a later clip in the same pass will not retry them.
pub fn pack_clip_segments(
    existing: Vec<Segment>,
    candidates: &[Candidate],
    state: &mut PackState,
    min_seconds: f64,
    max_seconds: f64,
) -> Vec<Segment> {
    let mut segments = normalize_segments(existing, max_seconds);
    let mut duration: f64 = segments.iter().map(Segment::duration).sum();
    let mut last_end = segments.last().map(|s| s.end).unwrap_or(-1.0);

    while state.cursor < candidates.len() && max_seconds - duration > DURATION_EPSILON {
        let candidate = &candidates[state.cursor];
        state.cursor += 1;

        if candidate.end - candidate.start <= DURATION_EPSILON {
            continue;
        }
        if !state.allow_overlap && state.is_claimed(candidate.start, candidate.end) {
            continue;
        }
        if candidate.start < last_end {
            continue;
        }

        let budget = max_seconds - duration;
        let end = candidate.end.min(candidate.start + budget);
        state.claim(candidate.start, candidate.end);
        duration += end - candidate.start;
        last_end = end;
        segments.push(Segment::new(candidate.start, end, candidate.text.clone()));
    }

    if duration + DURATION_EPSILON < min_seconds {
        return Vec::new();
    }
    segments
}
