//! Re-run a landmark recording through the gesture controller.

use std::path::PathBuf;
use std::time::Duration;

use handmouse_common::config::AppConfig;
use handmouse_engine::{
    load_recording, open_view, replay_recording, ControlSession, DebugView, HeadlessView,
};
use handmouse_gesture_core::GestureController;
use handmouse_pointer::{detect_best_backend, PointerBackend, StubPointer};

use super::{print_summary, screen_size, stop_on_ctrl_c};

pub fn run(
    config: AppConfig,
    path: PathBuf,
    display: bool,
    live_pointer: bool,
) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let recording = load_recording(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load recording: {e}"))?;
    if let Some(header) = &recording.header {
        println!(
            "Replaying {} ({} frames, {}x{}, recorded {})",
            path.display(),
            recording.frames.len(),
            header.frame_width,
            header.frame_height,
            header.recorded_at
        );
    } else {
        println!(
            "Replaying {} ({} frames, no header)",
            path.display(),
            recording.frames.len()
        );
    }

    let pointer: Box<dyn PointerBackend> = if live_pointer {
        detect_best_backend(false)
    } else {
        Box::new(StubPointer::default())
    };
    let screen = screen_size(pointer.as_ref());

    let (frames, detector) =
        replay_recording(recording, (config.camera.width, config.camera.height));
    let frame_size = (frames.width(), frames.height());
    let controller = GestureController::new(&config.gesture, frame_size, screen);

    let view: Box<dyn DebugView> = if display {
        open_view(&config.display)?
    } else {
        Box::new(HeadlessView)
    };

    // Debounce only when driving a real mouse.
    let debounce = if live_pointer {
        Duration::from_millis(config.gesture.click_debounce_ms)
    } else {
        Duration::ZERO
    };

    let mut session = ControlSession::new(
        Box::new(frames),
        Box::new(detector),
        controller,
        pointer,
        view,
        debounce,
    )
    .with_stop_flag(stop_on_ctrl_c()?);
    let summary = session.run()?;
    print_summary(&summary);
    Ok(())
}
