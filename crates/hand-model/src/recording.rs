//! Landmark recording format.
//!
//! A recording is JSONL: an optional `# `-prefixed header line followed by
//! one frame record per line. Frames without a hand carry an empty
//! landmark list, so replaying a recording reproduces the exact frame
//! sequence the controller saw.

use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkSet;

/// Current schema version written into headers.
pub const SCHEMA_VERSION: &str = "1.0";

/// Metadata written as the first line of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at recording start (RFC 3339).
    pub recorded_at: String,

    /// Pixel size of the frames the landmarks were measured in.
    pub frame_width: u32,
    pub frame_height: u32,
}

/// The landmarks detected in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Monotonic nanoseconds since recording start.
    #[serde(rename = "t")]
    pub timestamp_ns: u64,

    /// Detected landmarks; empty when no hand was found.
    pub landmarks: LandmarkSet,
}

/// A parsed recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub header: Option<RecordingHeader>,
    pub frames: Vec<FrameRecord>,
}

/// Failure to parse a recording, with the 1-based line it occurred on.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct RecordingParseError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse recording content. The header is taken from the first `#` line
/// that holds a JSON object; other `#` lines and blank lines are skipped.
pub fn parse_recording(jsonl: &str) -> Result<Recording, RecordingParseError> {
    let mut header = None;
    let mut frames = Vec::new();

    for (idx, raw) in jsonl.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if header.is_none() && comment.starts_with('{') {
                header = Some(
                    serde_json::from_str(comment)
                        .map_err(|source| RecordingParseError { line: idx + 1, source })?,
                );
            }
            continue;
        }
        frames.push(
            serde_json::from_str(line)
                .map_err(|source| RecordingParseError { line: idx + 1, source })?,
        );
    }

    Ok(Recording { header, frames })
}

/// Serialize a header as its comment line (without trailing newline).
pub fn header_line(header: &RecordingHeader) -> Result<String, serde_json::Error> {
    Ok(format!("# {}", serde_json::to_string(header)?))
}
