//! Landmark recorder: writes the frames a session saw as JSONL.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::landmark::LandmarkSet;
use handmouse_hand_model::recording::{header_line, FrameRecord, RecordingHeader};

/// Flush to disk every this many frames.
const FLUSH_EVERY: u64 = 300;

/// Writes landmark frames to a recording file, header first.
pub struct LandmarkWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    frames_written: u64,
}

impl LandmarkWriter {
    /// Create (or truncate) a recording at `path`.
    pub fn create(path: &Path, header: &RecordingHeader) -> HandmouseResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", header_line(header)?)
            .and_then(|()| writer.flush())
            .map_err(|e| HandmouseError::recording(format!("Failed to write header: {e}")))?;

        tracing::info!(path = %path.display(), "Recording landmarks");
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            frames_written: 0,
        })
    }

    /// Append one frame.
    pub fn write_frame(
        &mut self,
        timestamp_ns: u64,
        landmarks: &LandmarkSet,
    ) -> HandmouseResult<()> {
        let record = FrameRecord {
            timestamp_ns,
            landmarks: landmarks.clone(),
        };
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| HandmouseError::recording(format!("Failed to write frame: {e}")))?;
        self.frames_written += 1;

        if self.frames_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush buffered frames to disk.
    pub fn flush(&mut self) -> HandmouseResult<()> {
        self.writer
            .flush()
            .map_err(|e| HandmouseError::recording(format!("Failed to flush recording: {e}")))
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LandmarkWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
