//! Selection orchestrator.
//!
//! Sequences candidate building, the optional ranked attempt, heuristic
//! packing, validation, and reindexing:
//!
//! ```text
//! BuildCandidates -> AttemptRanked -> {PackRanked | Heuristic}
//!                 -> ExtendIfShort -> Validate -> Reindex -> Done
//! ```
//!
//! Every ranking failure (transport, timeout, malformed payload, empty
//! response) routes to the heuristic path and is absorbed; only an empty
//! transcript or a post-relaxation candidate exhaustion leaves the run
//! without clips.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use kklip_models::{Candidate, Clip, Segment, SelectionProvenance, TranscriptChunk};
use kklip_ranking::{RankingClient, RankingRequest, SegmentRef};

use crate::candidates::build_candidates;
use crate::error::{SelectError, SelectResult};
use crate::packer::{pack_clip_segments, PackState};
use crate::reindex::reindex_clips;
use crate::validate::finalize_clips;

/// Maximum hook length taken from a segment's leading text.
const HOOK_MAX_CHARS: usize = 120;

/// One selection run's inputs.
#[derive(Debug, Clone)]
pub struct SelectionRequest<'a> {
    /// Job identifier, used for logging and service-side correlation
    pub job_id: &'a str,

    /// Output language requested by the user (`auto` for detection)
    pub language: &'a str,

    /// Number of clips requested
    pub clip_count: usize,

    /// Minimum clip duration in seconds
    pub min_seconds: f64,

    /// Maximum clip duration in seconds
    pub max_seconds: f64,

    /// Ordered transcript chunks
    pub chunks: &'a [TranscriptChunk],
}

impl SelectionRequest<'_> {
    /// Real end of the transcript, before candidate over-provisioning.
    ///
    /// Segments are clamped back to this during validation; a candidate
    /// window padded past it cannot manufacture duration out of silence.
    fn source_end(&self) -> Option<f64> {
        self.chunks
            .iter()
            .map(|c| c.end)
            .fold(None, |acc: Option<f64>, end| {
                Some(acc.map_or(end, |a| a.max(end)))
            })
    }
}

/// The result of one selection run.
///
/// `clips` may be empty; when it is, [`SelectionOutcome::failure`] names the
/// terminal condition. Callers that treat "no clips produced" as a job
/// failure use [`SelectionOutcome::require_clips`].
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// Final, reindexed clip list
    pub clips: Vec<Clip>,

    /// Where the clips came from
    pub provenance: SelectionProvenance,

    failure: Option<SelectError>,
}

impl SelectionOutcome {
    /// The terminal failure, when the run produced no clips.
    pub fn failure(&self) -> Option<SelectError> {
        self.failure
    }

    /// Convert an empty run into its terminal error.
    pub fn require_clips(self) -> SelectResult<Self> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Run one selection pass over the given transcript chunks.
pub async fn select_clips(
    request: &SelectionRequest<'_>,
    ranking: &dyn RankingClient,
) -> SelectionOutcome {
    let source = ranking.source().to_string();
    let candidates = build_candidates(request.chunks, request.min_seconds, request.max_seconds);

    if candidates.is_empty() {
        info!(job_id = %request.job_id, "No candidate windows, skipping selection");
        return SelectionOutcome {
            clips: Vec::new(),
            provenance: SelectionProvenance::heuristic(source),
            failure: Some(SelectError::EmptyTranscript),
        };
    }

    match attempt_ranked(request, ranking, &candidates).await {
        Some((mut clips, mut state)) => {
            if clips.len() < request.clip_count {
                debug!(
                    job_id = %request.job_id,
                    ranked = clips.len(),
                    requested = request.clip_count,
                    "Ranked selection came up short, extending heuristically"
                );
                extend_clips(&mut clips, &candidates, &mut state, request);
            }

            // Extension clips have not been validated yet, and relaxation may
            // have changed the strictness in play.
            let mut clips = finalize_clips(
                clips,
                request.clip_count,
                request.min_seconds,
                request.max_seconds,
                !state.allow_overlap(),
                request.source_end(),
            );

            if clips.is_empty() {
                // Nothing usable came out of the ranked attempt or its
                // extension. Discard it all and restart from the full
                // candidate list.
                warn!(job_id = %request.job_id, "Ranked selection yielded no usable clips");
                state.reset_for_restart();
                return heuristic_outcome(request, &candidates, state, source);
            }

            reindex_clips(&mut clips);
            info!(
                job_id = %request.job_id,
                clips = clips.len(),
                "Selection complete (ranked)"
            );
            SelectionOutcome {
                clips,
                provenance: SelectionProvenance::ranked(source),
                failure: None,
            }
        }
        None => heuristic_outcome(request, &candidates, PackState::new(), source),
    }
}

/// Call the ranking service and resolve its items into validated clip drafts.
///
/// Returns `None` on any ranking failure or an empty item list; the caller
/// falls back to the heuristic path. On success the returned [`PackState`]
/// carries the claimed windows and the cursor position where resolution
/// stopped, so extension packing resumes rather than restarting.
async fn attempt_ranked(
    request: &SelectionRequest<'_>,
    ranking: &dyn RankingClient,
    candidates: &[Candidate],
) -> Option<(Vec<Clip>, PackState)> {
    let wire_request = RankingRequest {
        job_id: request.job_id,
        language: request.language,
        clip_count: request.clip_count,
        min_seconds: request.min_seconds,
        max_seconds: request.max_seconds,
        candidates,
    };

    let items = match ranking.select(&wire_request).await {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            info!(job_id = %request.job_id, "Ranking returned no items, using heuristic");
            return None;
        }
        Err(e) => {
            warn!(job_id = %request.job_id, error = %e, "Ranking call failed, using heuristic");
            return None;
        }
    };

    let lookup: HashMap<&str, (usize, &Candidate)> = candidates
        .iter()
        .enumerate()
        .map(|(ordinal, c)| (c.id.as_str(), (ordinal, c)))
        .collect();

    let mut state = PackState::new();
    let mut drafts: Vec<Clip> = Vec::with_capacity(items.len());

    for item in items {
        let mut segments: Vec<Segment> = Vec::with_capacity(item.refs.len());
        for segment_ref in item.refs {
            match segment_ref {
                SegmentRef::Candidate(id) => match lookup.get(id.as_str()) {
                    Some(&(ordinal, candidate)) => {
                        state.claim(candidate.start, candidate.end);
                        state.advance_to(ordinal + 1);
                        segments.push(Segment::new(
                            candidate.start,
                            candidate.end,
                            candidate.text.clone(),
                        ));
                    }
                    None => {
                        debug!(candidate_id = %id, "Dropping reference to unknown candidate");
                    }
                },
                SegmentRef::Window { start, end } => {
                    state.claim(start, end);
                    segments.push(Segment::new(start, end, String::new()));
                }
            }
        }

        if segments.is_empty() {
            continue;
        }

        let ordinal = drafts.len() as u32 + 1;
        let title = if item.title.trim().is_empty() {
            Clip::placeholder_title(ordinal)
        } else {
            item.title
        };
        let mut clip = Clip::new(ordinal, title, item.hook.unwrap_or_default());
        clip.segments = segments;
        drafts.push(clip);
    }

    let clips = finalize_clips(
        drafts,
        request.clip_count,
        request.min_seconds,
        request.max_seconds,
        true,
        request.source_end(),
    );
    Some((clips, state))
}

/// Pack additional clips until the requested count is met or candidates run
/// out, applying the one-shot overlap relaxation when strictly disjoint
/// coverage is impossible.
fn extend_clips(
    clips: &mut Vec<Clip>,
    candidates: &[Candidate],
    state: &mut PackState,
    request: &SelectionRequest<'_>,
) {
    while clips.len() < request.clip_count {
        let segments = pack_clip_segments(
            Vec::new(),
            candidates,
            state,
            request.min_seconds,
            request.max_seconds,
        );

        if segments.is_empty() {
            if state.can_relax() {
                info!(
                    job_id = %request.job_id,
                    clips = clips.len(),
                    "Disjoint candidates exhausted, relaxing overlap constraint"
                );
                state.relax();
                continue;
            }
            break;
        }

        let ordinal = clips.len() as u32 + 1;
        let hook = segments
            .first()
            .map(|s| s.text.chars().take(HOOK_MAX_CHARS).collect::<String>())
            .unwrap_or_default();
        let mut clip = Clip::new(ordinal, Clip::placeholder_title(ordinal), hook);
        clip.segments = segments;
        clips.push(clip);
    }
}

/// The pure heuristic path: pack from the given state, validate, reindex.
fn heuristic_outcome(
    request: &SelectionRequest<'_>,
    candidates: &[Candidate],
    mut state: PackState,
    source: String,
) -> SelectionOutcome {
    let mut clips: Vec<Clip> = Vec::new();
    extend_clips(&mut clips, candidates, &mut state, request);

    let mut clips = finalize_clips(
        clips,
        request.clip_count,
        request.min_seconds,
        request.max_seconds,
        !state.allow_overlap(),
        request.source_end(),
    );
    reindex_clips(&mut clips);

    let failure = if clips.is_empty() {
        Some(SelectError::CandidateExhausted)
    } else {
        None
    };
    info!(
        job_id = %request.job_id,
        clips = clips.len(),
        "Selection complete (heuristic)"
    );
    SelectionOutcome {
        clips,
        provenance: SelectionProvenance::heuristic(source),
        failure,
    }
}
