//! Transcript ingestion: WebVTT parsing and chunk merging.

use std::path::Path;

use kklip_models::{TranscriptChunk, TranscriptEntry};

use crate::error::WorkerResult;

/// Minimum time span a merged chunk must cover before it is flushed.
pub const CHUNK_MIN_SECONDS: f64 = 10.0;

/// Read and parse a WebVTT caption file.
pub fn read_vtt(path: &Path) -> WorkerResult<Vec<TranscriptEntry>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_vtt(&contents))
}

/// Parse WebVTT captions into timed transcript entries.
///
/// Only cue timing lines and their payload are interpreted; headers, cue
/// identifiers, and style blocks fall through. Cue settings after the end
/// timestamp are ignored, and cues with an empty payload or an unparsable
/// timestamp are dropped.
pub fn parse_vtt(contents: &str) -> Vec<TranscriptEntry> {
    let lines: Vec<&str> = contents.lines().collect();
    let mut entries = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx].trim();
        if let Some((raw_start, raw_end)) = line.split_once("-->") {
            let start = parse_timestamp(raw_start.trim());
            let end = raw_end
                .trim()
                .split(' ')
                .next()
                .and_then(parse_timestamp);

            idx += 1;
            let mut text_lines: Vec<&str> = Vec::new();
            while idx < lines.len() && !lines[idx].trim().is_empty() {
                text_lines.push(lines[idx].trim());
                idx += 1;
            }

            if let (Some(start), Some(end)) = (start, end) {
                let text = text_lines.join(" ").trim().to_string();
                if !text.is_empty() {
                    entries.push(TranscriptEntry::new(text, start, (end - start).max(0.0)));
                }
            }
        }
        idx += 1;
    }

    entries
}

/// Parse a VTT timestamp (`HH:MM:SS.mmm`, hours optional, comma decimal
/// separator tolerated) into seconds.
fn parse_timestamp(value: &str) -> Option<f64> {
    let mut seconds = 0.0;
    for part in value.replace(',', ".").split(':') {
        seconds = seconds * 60.0 + part.trim().parse::<f64>().ok()?;
    }
    Some(seconds)
}

/// Merge transcript entries into chunks spanning at least
/// [`CHUNK_MIN_SECONDS`], flushing the trailing partial buffer.
///
/// Entry order is preserved; a chunk's window runs from its first entry's
/// start to its last entry's end.
pub fn chunk_transcript(entries: &[TranscriptEntry]) -> Vec<TranscriptChunk> {
    let mut chunks: Vec<TranscriptChunk> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut window: Option<(f64, f64)> = None;

    for entry in entries {
        window = Some(match window {
            None => (entry.start, entry.end()),
            Some((start, _)) => (start, entry.end()),
        });
        buffer.push(&entry.text);

        if let Some((start, end)) = window {
            if end - start >= CHUNK_MIN_SECONDS {
                chunks.push(TranscriptChunk::new(start, end, buffer.join(" ")));
                buffer.clear();
                window = None;
            }
        }
    }

    if let Some((start, end)) = window {
        if !buffer.is_empty() {
            chunks.push(TranscriptChunk::new(start, end, buffer.join(" ")));
        }
    }

    chunks
}
