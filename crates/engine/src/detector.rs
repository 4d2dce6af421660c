//! Hand-landmark detection.
//!
//! The landmark model runs in a child process speaking a small
//! stdin/stdout protocol:
//!
//! 1. On startup the child prints `READY`.
//! 2. Per frame the parent writes `width`, `height`, `channels` as
//!    little-endian `u32`, then the raw BGR bytes.
//! 3. The child answers with one JSON line:
//!    `{"hands": [{"handedness", "score", "landmarks": [{"x","y","z"}]}], "error": null}`
//!    with coordinates normalized to `[0, 1]`.
//!
//! Finding no hand is the common case and yields an empty set.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdout, Command, Stdio};

use serde::Deserialize;

use handmouse_common::config::DetectorConfig;
use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::landmark::{ids, LandmarkSet};

use crate::frame::Frame;

/// Trait for hand-landmark detectors.
pub trait LandmarkDetector {
    /// Locate one hand in the frame, in pixel coordinates of that frame.
    fn detect(&mut self, frame: &Frame) -> HandmouseResult<LandmarkSet>;

    /// Detector name for logging.
    fn name(&self) -> &str;
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResponse {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// MediaPipe Hands running in a child process.
pub struct MediapipeDetector {
    child: Child,
    stdout: BufReader<ChildStdout>,
    min_score: f32,
}

impl MediapipeDetector {
    /// Launch the detector process and wait for it to report ready.
    pub fn spawn(config: &DetectorConfig) -> HandmouseResult<Self> {
        if !config.script.exists() {
            return Err(HandmouseError::FileNotFound {
                path: config.script.clone(),
            });
        }

        tracing::info!(
            program = %config.program,
            script = %config.script.display(),
            "Starting hand detector subprocess"
        );

        let mut command = Command::new(&config.program);
        // Ctrl+C in the terminal is handled by the session, not the model
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut command, 0);

        let mut child = command
            .arg(&config.script)
            .arg("--max-hands")
            .arg(config.max_hands.to_string())
            .arg("--detection-confidence")
            .arg(config.detection_confidence.to_string())
            .arg("--tracking-confidence")
            .arg(config.tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                HandmouseError::detector(format!("Failed to start {}: {e}", config.program))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HandmouseError::detector("detector stdout was not captured"))?;
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        stdout
            .read_line(&mut ready)
            .map_err(|e| HandmouseError::detector(format!("Failed waiting for detector: {e}")))?;
        if ready.trim() != "READY" {
            let _ = child.kill();
            let _ = child.wait();
            return Err(HandmouseError::detector(format!(
                "detector did not signal ready, got {:?}",
                ready.trim()
            )));
        }

        tracing::info!("Hand detector ready");
        Ok(Self {
            child,
            stdout,
            min_score: config.detection_confidence,
        })
    }

    fn exchange(&mut self, frame: &Frame) -> HandmouseResult<String> {
        let stdin = self
            .child
            .stdin
            .as_mut()
            .ok_or_else(|| HandmouseError::detector("detector stdin is closed"))?;

        let io_err =
            |e: std::io::Error| HandmouseError::detector(format!("Failed to send frame: {e}"));
        stdin.write_all(&frame.width.to_le_bytes()).map_err(io_err)?;
        stdin.write_all(&frame.height.to_le_bytes()).map_err(io_err)?;
        stdin.write_all(&frame.channels.to_le_bytes()).map_err(io_err)?;
        stdin.write_all(&frame.data).map_err(io_err)?;
        stdin.flush().map_err(io_err)?;

        let mut line = String::new();
        let read = self
            .stdout
            .read_line(&mut line)
            .map_err(|e| HandmouseError::detector(format!("Failed to read detection: {e}")))?;
        if read == 0 {
            return Err(HandmouseError::detector("detector process exited"));
        }
        Ok(line)
    }
}

impl LandmarkDetector for MediapipeDetector {
    fn detect(&mut self, frame: &Frame) -> HandmouseResult<LandmarkSet> {
        if !frame.has_pixels() {
            return Ok(LandmarkSet::empty());
        }
        let line = self.exchange(frame)?;
        parse_response(&line, frame.width, frame.height, self.min_score)
    }

    fn name(&self) -> &str {
        "mediapipe"
    }
}

impl Drop for MediapipeDetector {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Convert one response line into the landmarks of the first confident hand.
fn parse_response(
    line: &str,
    width: u32,
    height: u32,
    min_score: f32,
) -> HandmouseResult<LandmarkSet> {
    let response: DetectionResponse = serde_json::from_str(line.trim()).map_err(|e| {
        HandmouseError::detector(format!("Unparsable detector response {:?}: {e}", line.trim()))
    })?;

    if let Some(error) = response.error {
        tracing::warn!(%error, "Detector reported an error");
        return Ok(LandmarkSet::empty());
    }

    for hand in response.hands {
        if hand.score < min_score {
            continue;
        }
        if hand.landmarks.len() != ids::HAND_POINTS {
            tracing::warn!(
                points = hand.landmarks.len(),
                expected = ids::HAND_POINTS,
                "Unexpected landmark count"
            );
        }
        tracing::trace!(handedness = %hand.handedness, score = hand.score, "Hand detected");
        return Ok(LandmarkSet::from_normalized(
            hand.landmarks.iter().map(|l| (l.x, l.y)),
            width,
            height,
        ));
    }

    Ok(LandmarkSet::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use handmouse_hand_model::landmark::Landmark;

    fn hand_json(score: f32, points: usize) -> String {
        let landmarks = (0..points)
            .map(|i| format!(r#"{{"x":{},"y":0.5,"z":0.0}}"#, i as f32 / 100.0))
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"{{"handedness":"Right","score":{score},"landmarks":[{landmarks}]}}"#)
    }

    #[test]
    fn test_no_hands_is_an_empty_set() {
        let set = parse_response(r#"{"hands":[],"error":null}"#, 700, 500, 0.5).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_first_confident_hand_is_converted_to_pixels() {
        let line = format!(
            r#"{{"hands":[{},{}]}}"#,
            hand_json(0.2, 21),
            hand_json(0.9, 21)
        );
        let set = parse_response(&line, 700, 500, 0.5).unwrap();
        assert_eq!(set.len(), 21);
        assert_eq!(set.get(10), Some(&Landmark::new(10, 70, 250)));
    }

    #[test]
    fn test_short_hands_are_passed_through() {
        let line = format!(r#"{{"hands":[{}]}}"#, hand_json(0.9, 5));
        let set = parse_response(&line, 100, 100, 0.5).unwrap();
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_reported_error_is_an_empty_set() {
        let line = r#"{"hands":[],"error":"bad frame"}"#;
        let set = parse_response(line, 700, 500, 0.5).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_garbage_is_a_detector_error() {
        let err =
            parse_response("Traceback (most recent call last):", 700, 500, 0.5).unwrap_err();
        assert!(matches!(err, HandmouseError::Detector { .. }));
    }

    #[test]
    fn test_missing_script_is_file_not_found() {
        let config = DetectorConfig {
            script: std::env::temp_dir().join("handmouse_no_such_detector.py"),
            ..DetectorConfig::default()
        };
        assert!(matches!(
            MediapipeDetector::spawn(&config),
            Err(HandmouseError::FileNotFound { .. })
        ));
    }

    /// Write a shell script standing in for the model process.
    #[cfg(unix)]
    fn fake_detector(name: &str, body: &str) -> DetectorConfig {
        let dir = std::env::temp_dir().join("handmouse_test_detector");
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join(format!("{name}.sh"));
        std::fs::write(&script, body).unwrap();
        DetectorConfig {
            program: "sh".to_string(),
            script,
            ..DetectorConfig::default()
        }
    }

    /// Answers one 2x1 BGR frame, then exits. The answer carries a hand only
    /// when the header was `2, 1, 3` as little-endian u32 and exactly six
    /// pixel bytes followed.
    #[cfg(unix)]
    const ONE_FRAME: &str = r#"echo READY
header=$(head -c 12 | od -An -tu1)
header=$(echo $header)
bytes=$(head -c 6 | wc -c | tr -d ' ')
if [ "$header" = "2 0 0 0 1 0 0 0 3 0 0 0" ] && [ "$bytes" = "6" ]; then
  echo '{"hands":[{"handedness":"Right","score":0.9,"landmarks":[{"x":0.5,"y":0.0,"z":0.0}]}],"error":null}'
else
  echo "{\"hands\":[],\"error\":\"got [$header] and $bytes bytes\"}"
fi
"#;

    #[cfg(unix)]
    #[test]
    fn test_frame_exchange_with_child_process() {
        let config = fake_detector("one_frame", ONE_FRAME);
        let mut detector = MediapipeDetector::spawn(&config).unwrap();
        assert_eq!(detector.name(), "mediapipe");

        // pixel-less frames never reach the child
        assert!(detector.detect(&Frame::blank(2, 1)).unwrap().is_empty());

        let frame = Frame::new(2, 1, 3, vec![7; 6]).unwrap();
        let set = detector.detect(&frame).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0), Some(&Landmark::new(0, 1, 0)));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_exit_is_a_detector_error() {
        let config = fake_detector("exit_after_one", ONE_FRAME);
        let mut detector = MediapipeDetector::spawn(&config).unwrap();
        let frame = Frame::new(2, 1, 3, vec![0; 6]).unwrap();
        detector.detect(&frame).unwrap();

        let err = detector.detect(&frame).unwrap_err();
        assert!(matches!(err, HandmouseError::Detector { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_ready_line_fails_spawn() {
        let config = fake_detector("not_ready", "echo 'ImportError: no module named mediapipe'\n");
        let err = MediapipeDetector::spawn(&config).err().unwrap();
        assert!(matches!(err, HandmouseError::Detector { .. }));
        assert!(err.to_string().contains("did not signal ready"));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_program_fails_spawn() {
        let mut config = fake_detector("no_program", "echo READY\n");
        config.program = "handmouse-no-such-interpreter".to_string();
        assert!(matches!(
            MediapipeDetector::spawn(&config),
            Err(HandmouseError::Detector { .. })
        ));
    }
}
