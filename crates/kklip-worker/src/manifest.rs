//! Job artifact assembly: the EDL and the output manifest.

use std::path::Path;

use serde::Serialize;

use kklip_models::{Clip, Segment, SelectionProvenance};

use crate::error::WorkerResult;

/// Edit decision list written to `edl.json` for downstream inspection.
#[derive(Debug, Serialize)]
pub struct Edl<'a> {
    pub job_id: &'a str,
    pub clips: Vec<EdlClip<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EdlClip<'a> {
    pub index: u32,
    pub title: &'a str,
    pub hook: &'a str,
    pub start: f64,
    pub end: f64,
    pub segments: &'a [Segment],
}

/// Manifest written to `manifest.json`, the contract consumed by the
/// renderer and the backend.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub job_id: &'a str,
    pub generated_at: String,
    pub selection: &'a SelectionProvenance,
    pub clips: Vec<ManifestClip<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ManifestClip<'a> {
    pub index: u32,
    pub title: &'a str,
    pub hook: &'a str,
    pub start: f64,
    pub end: f64,
    /// Total duration in whole seconds
    pub duration: i64,
    /// Output filename, derived from the reindexed clip index
    pub file: String,
    pub segments: &'a [Segment],
}

/// Build the EDL for a finished clip list.
pub fn build_edl<'a>(job_id: &'a str, clips: &'a [Clip]) -> Edl<'a> {
    Edl {
        job_id,
        clips: clips
            .iter()
            .map(|clip| EdlClip {
                index: clip.index,
                title: &clip.title,
                hook: &clip.hook,
                start: clip.start().unwrap_or(0.0),
                end: clip.end().unwrap_or(0.0),
                segments: &clip.segments,
            })
            .collect(),
    }
}

/// Build the output manifest for a finished clip list.
pub fn build_manifest<'a>(
    job_id: &'a str,
    clips: &'a [Clip],
    provenance: &'a SelectionProvenance,
) -> Manifest<'a> {
    Manifest {
        job_id,
        generated_at: chrono::Utc::now().to_rfc3339(),
        selection: provenance,
        clips: clips
            .iter()
            .map(|clip| ManifestClip {
                index: clip.index,
                title: &clip.title,
                hook: &clip.hook,
                start: clip.start().unwrap_or(0.0),
                end: clip.end().unwrap_or(0.0),
                duration: clip.total_duration().round() as i64,
                file: clip.output_filename(),
                segments: &clip.segments,
            })
            .collect(),
    }
}

/// Serialize a value as pretty JSON and write it to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> WorkerResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kklip_models::Segment;

    fn sample_clips() -> Vec<Clip> {
        let mut first = Clip::new(1, "The big moment", "You won't believe this");
        first.segments = vec![Segment::new(80.0, 140.0, "chunk 2")];
        let mut second = Clip::new(2, "Clip 2", "chunk 4");
        second.segments = vec![
            Segment::new(240.0, 270.0, "chunk 4"),
            Segment::new(300.0, 320.0, "chunk 5"),
        ];
        vec![first, second]
    }

    #[test]
    fn test_manifest_fields() {
        let clips = sample_clips();
        let provenance = SelectionProvenance::ranked("https://ranker.internal");
        let manifest = build_manifest("job-123", &clips, &provenance);
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["job_id"], "job-123");
        assert_eq!(value["selection"]["mode"], "ranked");
        assert_eq!(value["selection"]["source"], "https://ranker.internal");

        let first = &value["clips"][0];
        assert_eq!(first["index"], 1);
        assert_eq!(first["title"], "The big moment");
        assert_eq!(first["file"], "clip_01.mp4");
        assert_eq!(first["duration"], 60);

        let second = &value["clips"][1];
        assert_eq!(second["start"], 240.0);
        assert_eq!(second["end"], 320.0);
        assert_eq!(second["duration"], 50);
        assert_eq!(second["segments"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_edl_omits_render_fields() {
        let clips = sample_clips();
        let edl = build_edl("job-123", &clips);
        let value = serde_json::to_value(&edl).unwrap();

        assert_eq!(value["clips"][0]["start"], 80.0);
        assert!(value["clips"][0].get("file").is_none());
        assert!(value["clips"][0].get("duration").is_none());
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edl.json");
        let clips = sample_clips();
        write_json(&path, &build_edl("job-123", &clips)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["job_id"], "job-123");
    }
}
