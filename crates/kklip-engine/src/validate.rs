//! Segment and clip validation/normalization.

use std::cmp::Ordering;

use kklip_models::{Clip, Segment};

/// Comparison slack for floating-point durations.
pub const DURATION_EPSILON: f64 = 1e-6;

/// Normalize a segment list against a duration cap.
///
/// Sorts by start, drops empty/inverted segments and segments overlapping a
/// previously accepted one, and truncates a segment once the running total
/// would exceed `max_seconds`; nothing is added after a truncation.
pub fn normalize_segments(mut segments: Vec<Segment>, max_seconds: f64) -> Vec<Segment> {
    segments.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    let mut kept: Vec<Segment> = Vec::with_capacity(segments.len());
    let mut duration = 0.0;
    let mut last_end = -1.0_f64;

    for mut segment in segments {
        if segment.start < 0.0 || segment.end - segment.start <= DURATION_EPSILON {
            continue;
        }
        if segment.start < last_end {
            continue;
        }

        let budget = max_seconds - duration;
        if budget <= DURATION_EPSILON {
            break;
        }
        if segment.duration() > budget {
            segment.end = segment.start + budget;
        }

        duration += segment.duration();
        last_end = segment.end;
        kept.push(segment);

        if max_seconds - duration <= DURATION_EPSILON {
            break;
        }
    }

    kept
}

/// Whether a total clip duration falls inside the accepted bounds.
pub fn clip_duration_ok(duration: f64, min_seconds: f64, max_seconds: f64) -> bool {
    duration + DURATION_EPSILON >= min_seconds && duration <= max_seconds + DURATION_EPSILON
}

/// Validate candidate clips and produce the accepted, ordered list.
///
/// Each draft's segments are first clamped to `source_end` (candidate
/// windows are over-provisioned past their chunk's real end, and ranked
/// responses may reference time that does not exist), then normalized. A
/// clip is accepted only with at least one segment and a total duration
/// inside `[min_seconds, max_seconds]`. Accepted clips are sorted by
/// first-segment start. In strict mode a clip whose first segment starts
/// before the previous accepted clip's end is dropped, which gives pairwise
/// non-overlap across all clip segments. The result is capped at
/// `clip_count`.
pub fn finalize_clips(
    drafts: Vec<Clip>,
    clip_count: usize,
    min_seconds: f64,
    max_seconds: f64,
    strict: bool,
    source_end: Option<f64>,
) -> Vec<Clip> {
    let mut accepted: Vec<Clip> = Vec::with_capacity(drafts.len());

    for mut clip in drafts {
        if let Some(limit) = source_end {
            for segment in &mut clip.segments {
                segment.end = segment.end.min(limit);
            }
        }
        clip.segments = normalize_segments(std::mem::take(&mut clip.segments), max_seconds);
        if clip.segments.is_empty() {
            continue;
        }
        if !clip_duration_ok(clip.total_duration(), min_seconds, max_seconds) {
            continue;
        }
        accepted.push(clip);
    }

    accepted.sort_by(|a, b| {
        let a_start = a.start().unwrap_or(0.0);
        let b_start = b.start().unwrap_or(0.0);
        a_start.partial_cmp(&b_start).unwrap_or(Ordering::Equal)
    });

    if strict {
        let mut disjoint: Vec<Clip> = Vec::with_capacity(accepted.len());
        let mut last_end = -1.0_f64;
        for clip in accepted {
            let start = clip.start().unwrap_or(0.0);
            if start < last_end {
                continue;
            }
            last_end = clip.end().unwrap_or(start);
            disjoint.push(clip);
        }
        accepted = disjoint;
    }

    accepted.truncate(clip_count);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, segments: Vec<Segment>) -> Clip {
        Clip {
            index: 0,
            title: title.to_string(),
            hook: String::new(),
            segments,
        }
    }

    #[test]
    fn test_normalize_sorts_and_drops_inverted() {
        let segments = vec![
            Segment::new(30.0, 40.0, "b"),
            Segment::new(50.0, 50.0, "empty"),
            Segment::new(0.0, 10.0, "a"),
            Segment::new(20.0, 15.0, "inverted"),
        ];
        let kept = normalize_segments(segments, 60.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].start, 0.0);
        assert_eq!(kept[1].start, 30.0);
    }

    #[test]
    fn test_normalize_drops_overlapping() {
        let segments = vec![
            Segment::new(0.0, 20.0, "a"),
            Segment::new(10.0, 30.0, "overlaps a"),
            Segment::new(25.0, 35.0, "b"),
        ];
        let kept = normalize_segments(segments, 60.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].start, 25.0);
    }

    #[test]
    fn test_normalize_truncates_at_cap_and_stops() {
        let segments = vec![
            Segment::new(0.0, 40.0, "a"),
            Segment::new(50.0, 90.0, "b"),
            Segment::new(100.0, 110.0, "never reached"),
        ];
        let kept = normalize_segments(segments, 60.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].start, 50.0);
        assert!((kept[1].end - 70.0).abs() < 1e-9);
        let total: f64 = kept.iter().map(Segment::duration).sum();
        assert!((total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_finalize_rejects_out_of_bounds_durations() {
        let drafts = vec![
            draft("too short", vec![Segment::new(0.0, 10.0, "")]),
            draft("ok", vec![Segment::new(20.0, 55.0, "")]),
        ];
        let clips = finalize_clips(drafts, 5, 30.0, 60.0, true, None);
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].title, "ok");
    }

    #[test]
    fn test_finalize_sorts_and_caps() {
        let drafts = vec![
            draft("late", vec![Segment::new(200.0, 240.0, "")]),
            draft("early", vec![Segment::new(0.0, 40.0, "")]),
            draft("middle", vec![Segment::new(100.0, 140.0, "")]),
        ];
        let clips = finalize_clips(drafts, 2, 30.0, 60.0, true, None);
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].title, "early");
        assert_eq!(clips[1].title, "middle");
    }

    #[test]
    fn test_finalize_clamps_to_source_end() {
        // A window padded past the real transcript end loses the padding and
        // falls below the minimum duration.
        let drafts = vec![draft("padded", vec![Segment::new(0.0, 30.0, "")])];
        let clips = finalize_clips(drafts.clone(), 5, 30.0, 60.0, true, Some(20.0));
        assert!(clips.is_empty());

        let clips = finalize_clips(drafts, 5, 30.0, 60.0, true, None);
        assert_eq!(clips.len(), 1);
    }

    #[test]
    fn test_finalize_strict_drops_cross_clip_overlap() {
        let drafts = vec![
            draft("first", vec![Segment::new(0.0, 40.0, "")]),
            draft("overlaps first", vec![Segment::new(30.0, 70.0, "")]),
            draft("clear", vec![Segment::new(80.0, 120.0, "")]),
        ];
        let clips = finalize_clips(drafts.clone(), 5, 30.0, 60.0, true, None);
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[1].title, "clear");

        // Relaxed mode keeps the overlap.
        let clips = finalize_clips(drafts, 5, 30.0, 60.0, false, None);
        assert_eq!(clips.len(), 3);
    }
}
