//! Live gesture control from the camera.

use std::path::PathBuf;
use std::time::Duration;

use handmouse_common::config::AppConfig;
use handmouse_engine::{open_camera, open_view, ControlSession, LandmarkWriter, MediapipeDetector};
use handmouse_gesture_core::GestureController;
use handmouse_hand_model::recording::{RecordingHeader, SCHEMA_VERSION};
use handmouse_pointer::detect_best_backend;

use super::{print_summary, screen_size, stop_on_ctrl_c};

/// Command-line overrides for `run`.
pub struct RunOptions {
    pub camera: Option<i32>,
    pub no_display: bool,
    pub dry_run: bool,
    pub record: Option<PathBuf>,
}

pub fn run(mut config: AppConfig, options: RunOptions) -> anyhow::Result<()> {
    if let Some(index) = options.camera {
        config.camera.device_index = index;
    }
    if options.no_display {
        config.display.enabled = false;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let pointer = detect_best_backend(options.dry_run);
    let screen = screen_size(pointer.as_ref());
    let frame_size = (config.camera.width, config.camera.height);

    let source = open_camera(&config.camera)
        .map_err(|e| anyhow::anyhow!("Failed to open camera: {e}"))?;
    let detector = MediapipeDetector::spawn(&config.detector)
        .map_err(|e| anyhow::anyhow!("Failed to start hand detector: {e}"))?;
    let view = open_view(&config.display)?;
    let controller = GestureController::new(&config.gesture, frame_size, screen);

    tracing::info!(
        camera = config.camera.device_index,
        frame_width = frame_size.0,
        frame_height = frame_size.1,
        screen_width = screen.0,
        screen_height = screen.1,
        "Starting gesture control"
    );
    let stop = stop_on_ctrl_c()?;
    println!("Gesture control running. Press space in the preview window (or Ctrl+C) to stop.");

    let mut session = ControlSession::new(
        source,
        Box::new(detector),
        controller,
        pointer,
        view,
        Duration::from_millis(config.gesture.click_debounce_ms),
    )
    .with_stop_flag(stop);

    if let Some(path) = options.record {
        let header = RecordingHeader {
            schema_version: SCHEMA_VERSION.to_string(),
            recorded_at: session.clock().epoch_wall().to_string(),
            frame_width: frame_size.0,
            frame_height: frame_size.1,
        };
        let writer = LandmarkWriter::create(&path, &header)
            .map_err(|e| anyhow::anyhow!("Failed to create recording {}: {e}", path.display()))?;
        session = session.with_recorder(writer);
    }

    let summary = session.run()?;
    print_summary(&summary);
    Ok(())
}
