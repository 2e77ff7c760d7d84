//! Clip and segment models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An accepted sub-interval of source time included in a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds (start < end)
    pub end: f64,

    /// Transcript text backing the segment (empty for inline windows)
    #[serde(default)]
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Segment length in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A finished highlight clip: ordered segments plus title/hook metadata.
///
/// `index` is 1-based and reassigned when the final clip list is reindexed;
/// downstream collaborators derive output filenames from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// 1-based position in the final clip list
    pub index: u32,

    /// Clip title (ranking-authored, or a `Clip N` placeholder)
    pub title: String,

    /// Short hook text for social captions
    #[serde(default)]
    pub hook: String,

    /// Ordered, non-overlapping segments composing the clip
    pub segments: Vec<Segment>,
}

impl Clip {
    pub fn new(index: u32, title: impl Into<String>, hook: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            hook: hook.into(),
            segments: Vec::new(),
        }
    }

    /// Total clip duration: sum of segment lengths.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(Segment::duration).sum()
    }

    /// Start of the first segment, if any.
    pub fn start(&self) -> Option<f64> {
        self.segments.first().map(|s| s.start)
    }

    /// End of the last segment, if any.
    pub fn end(&self) -> Option<f64> {
        self.segments.last().map(|s| s.end)
    }

    /// The placeholder title used for heuristically packed clips.
    pub fn placeholder_title(index: u32) -> String {
        format!("Clip {}", index)
    }

    /// Whether the title is an unmodified `Clip N` placeholder.
    pub fn has_placeholder_title(&self) -> bool {
        self.title
            .strip_prefix("Clip ")
            .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    }

    /// Deterministic output filename derived from the final index.
    ///
    /// Format: `clip_{index:02}.mp4`
    pub fn output_filename(&self) -> String {
        format!("clip_{:02}.mp4", self.index)
    }
}
