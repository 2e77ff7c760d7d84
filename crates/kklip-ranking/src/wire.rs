//! Wire types for the ranking service protocol.

use kklip_models::Candidate;
use serde::{Deserialize, Serialize};

/// Request body sent to the ranking service.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRequest<'a> {
    /// Job identifier, for service-side correlation
    pub job_id: &'a str,

    /// Output language requested by the user (`auto` for detection)
    pub language: &'a str,

    /// Number of clips requested
    pub clip_count: usize,

    /// Minimum clip duration in seconds
    pub min_seconds: f64,

    /// Maximum clip duration in seconds
    pub max_seconds: f64,

    /// Ordered candidate windows the service may reference
    pub candidates: &'a [Candidate],
}

/// Response body from the ranking service.
#[derive(Debug, Deserialize)]
pub struct RankingResponse {
    /// Ordered selection items; may be empty
    #[serde(default)]
    pub items: Vec<RawSelectionItem>,
}

/// A selection item as it appears on the wire.
///
/// The shape is polymorphic: an item carries either a single `candidate_id`
/// or an ordered `segments` list whose entries are themselves candidate
/// references or inline `{start, end}` windows. [`RawSelectionItem::normalize`]
/// is the single place this shape is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSelectionItem {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub hook: Option<String>,

    #[serde(default)]
    pub candidate_id: Option<String>,

    #[serde(default)]
    pub segments: Option<Vec<RawSegmentRef>>,
}

/// One segment reference inside a wire selection item.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSegmentRef {
    Candidate { candidate_id: String },
    Window { start: f64, end: f64 },
}

/// A normalized segment reference.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentRef {
    /// Reference to a candidate window by id
    Candidate(String),
    /// Explicit time window in seconds
    Window { start: f64, end: f64 },
}

/// A normalized selection item: title, optional hook, ordered references.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionItem {
    pub title: String,
    pub hook: Option<String>,
    pub refs: Vec<SegmentRef>,
}

impl RawSelectionItem {
    /// Resolve the polymorphic wire shape into an ordered reference list.
    ///
    /// Returns `None` for items carrying neither a candidate reference nor
    /// any segments; such items are dropped, never fabricated.
    pub fn normalize(self) -> Option<SelectionItem> {
        let refs: Vec<SegmentRef> = match (self.candidate_id, self.segments) {
            (Some(id), _) => vec![SegmentRef::Candidate(id)],
            (None, Some(segments)) => segments
                .into_iter()
                .map(|seg| match seg {
                    RawSegmentRef::Candidate { candidate_id } => {
                        SegmentRef::Candidate(candidate_id)
                    }
                    RawSegmentRef::Window { start, end } => SegmentRef::Window { start, end },
                })
                .collect(),
            (None, None) => Vec::new(),
        };

        if refs.is_empty() {
            return None;
        }

        Some(SelectionItem {
            title: self.title.unwrap_or_default(),
            hook: self.hook,
            refs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_single_candidate_reference() {
        let raw: RawSelectionItem = serde_json::from_str(
            r#"{"title": "Big reveal", "hook": "Wait for it", "candidate_id": "c003"}"#,
        )
        .unwrap();

        let item = raw.normalize().unwrap();
        assert_eq!(item.title, "Big reveal");
        assert_eq!(item.hook.as_deref(), Some("Wait for it"));
        assert_eq!(item.refs, vec![SegmentRef::Candidate("c003".to_string())]);
    }

    #[test]
    fn test_normalize_mixed_segment_list() {
        let raw: RawSelectionItem = serde_json::from_str(
            r#"{"title": "Combo", "segments": [{"candidate_id": "c001"}, {"start": 95.0, "end": 110.0}]}"#,
        )
        .unwrap();

        let item = raw.normalize().unwrap();
        assert_eq!(
            item.refs,
            vec![
                SegmentRef::Candidate("c001".to_string()),
                SegmentRef::Window {
                    start: 95.0,
                    end: 110.0
                },
            ]
        );
    }

    #[test]
    fn test_normalize_drops_empty_items() {
        let raw: RawSelectionItem = serde_json::from_str(r#"{"title": "Nothing here"}"#).unwrap();
        assert!(raw.normalize().is_none());

        let raw: RawSelectionItem =
            serde_json::from_str(r#"{"title": "Empty list", "segments": []}"#).unwrap();
        assert!(raw.normalize().is_none());
    }

    #[test]
    fn test_candidate_id_takes_precedence_over_segments() {
        let raw: RawSelectionItem = serde_json::from_str(
            r#"{"candidate_id": "c002", "segments": [{"start": 0.0, "end": 5.0}]}"#,
        )
        .unwrap();

        let item = raw.normalize().unwrap();
        assert_eq!(item.refs, vec![SegmentRef::Candidate("c002".to_string())]);
    }
}
