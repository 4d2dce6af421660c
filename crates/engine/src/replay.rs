//! Replaying landmark recordings.
//!
//! A recording stands in for both the camera and the detector: the frame
//! source yields one pixel-less frame per recorded frame, and the detector
//! hands back the recorded landmarks in the same order.

use std::collections::VecDeque;
use std::path::Path;

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::landmark::LandmarkSet;
use handmouse_hand_model::recording::{parse_recording, Recording};

use crate::detector::LandmarkDetector;
use crate::frame::Frame;
use crate::source::FrameSource;

/// Read and parse a recording file.
pub fn load_recording(path: &Path) -> HandmouseResult<Recording> {
    if !path.exists() {
        return Err(HandmouseError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_recording(&content)
        .map_err(|e| HandmouseError::recording(format!("{}: {e}", path.display())))
}

/// Frame source producing `count` blank frames of a fixed size.
#[derive(Debug)]
pub struct ReplayFrames {
    remaining: usize,
    width: u32,
    height: u32,
}

impl ReplayFrames {
    pub fn new(count: usize, width: u32, height: u32) -> Self {
        Self {
            remaining: count,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl FrameSource for ReplayFrames {
    fn read(&mut self) -> HandmouseResult<Option<Frame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(Frame::blank(self.width, self.height)))
    }

    fn name(&self) -> &str {
        "replay"
    }
}

/// Detector that returns pre-recorded landmark sets in order, then empty sets.
#[derive(Debug, Default)]
pub struct ReplayDetector {
    frames: VecDeque<LandmarkSet>,
}

impl ReplayDetector {
    pub fn new(frames: impl IntoIterator<Item = LandmarkSet>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkDetector for ReplayDetector {
    fn detect(&mut self, _frame: &Frame) -> HandmouseResult<LandmarkSet> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "replay"
    }
}

/// Split a recording into a matching frame source and detector.
///
/// Frames take the recorded size, or `fallback_size` for headerless files.
pub fn replay_recording(
    recording: Recording,
    fallback_size: (u32, u32),
) -> (ReplayFrames, ReplayDetector) {
    let (width, height) = recording
        .header
        .as_ref()
        .map(|h| (h.frame_width, h.frame_height))
        .unwrap_or(fallback_size);
    let frames = ReplayFrames::new(recording.frames.len(), width, height);
    let detector = ReplayDetector::new(recording.frames.into_iter().map(|f| f.landmarks));
    (frames, detector)
}
