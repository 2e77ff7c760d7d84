//! Selection provenance models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the final clip list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// The external ranking call succeeded and seeded the selection
    Ranked,
    /// The deterministic local fallback produced the clips
    Heuristic,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Ranked => "ranked",
            SelectionMode::Heuristic => "heuristic",
        }
    }
}

/// Record of where a clip list came from, attached to the job manifest
/// for observability.
///
/// `source` is the configured ranking endpoint base. It is recorded even on
/// the heuristic path so a failed or skipped ranking call is still visible
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionProvenance {
    /// Selection mode
    pub mode: SelectionMode,

    /// Configured ranking endpoint base
    pub source: String,
}

impl SelectionProvenance {
    pub fn ranked(source: impl Into<String>) -> Self {
        Self {
            mode: SelectionMode::Ranked,
            source: source.into(),
        }
    }

    pub fn heuristic(source: impl Into<String>) -> Self {
        Self {
            mode: SelectionMode::Heuristic,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serializes_snake_case() {
        let json = serde_json::to_string(&SelectionMode::Heuristic).unwrap();
        assert_eq!(json, "\"heuristic\"");
        let json = serde_json::to_string(&SelectionMode::Ranked).unwrap();
        assert_eq!(json, "\"ranked\"");
    }
}
