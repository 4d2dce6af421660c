//! The control session: a single-threaded, blocking per-frame loop.
//!
//! `read -> detect -> record -> classify -> act -> render`, repeated until
//! the frame source runs out, the view asks to quit, or the stop flag is
//! raised (Ctrl+C). A click blocks the
//! whole loop for the debounce delay so one pinch does not fire on every
//! following frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use handmouse_common::clock::{FpsMeter, SessionClock};
use handmouse_common::error::HandmouseResult;
use handmouse_gesture_core::{GestureController, TrackingState};
use handmouse_hand_model::action::{MouseButton, PointerAction};
use handmouse_pointer::PointerBackend;

use crate::detector::LandmarkDetector;
use crate::recorder::LandmarkWriter;
use crate::source::FrameSource;
use crate::view::{DebugView, Overlay, ViewSignal};

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub frames: u64,
    pub hand_frames: u64,
    pub moves: u64,
    pub left_clicks: u64,
    pub right_clicks: u64,
}

impl SessionSummary {
    fn count(&mut self, action: &PointerAction) {
        match action {
            PointerAction::Move { .. } => self.moves += 1,
            PointerAction::Click {
                button: MouseButton::Left,
            } => self.left_clicks += 1,
            PointerAction::Click {
                button: MouseButton::Right,
            } => self.right_clicks += 1,
        }
    }
}

/// Wires a frame source, detector, controller, pointer, and view together.
pub struct ControlSession {
    source: Box<dyn FrameSource>,
    detector: Box<dyn LandmarkDetector>,
    controller: GestureController,
    pointer: Box<dyn PointerBackend>,
    view: Box<dyn DebugView>,
    recorder: Option<LandmarkWriter>,
    click_debounce: Duration,
    clock: SessionClock,
    stop: Arc<AtomicBool>,
}

impl ControlSession {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn LandmarkDetector>,
        controller: GestureController,
        pointer: Box<dyn PointerBackend>,
        view: Box<dyn DebugView>,
        click_debounce: Duration,
    ) -> Self {
        Self {
            source,
            detector,
            controller,
            pointer,
            view,
            recorder: None,
            click_debounce,
            clock: SessionClock::start(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Also write every frame's landmarks to `recorder`.
    pub fn with_recorder(mut self, recorder: LandmarkWriter) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Stop at the next frame once `stop` is set.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// The clock frame timestamps are taken from.
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Run until the source is exhausted, the view asks to quit, or the
    /// stop flag is set.
    ///
    /// The frame source is released and the recording flushed whether or
    /// not the loop fails.
    pub fn run(&mut self) -> HandmouseResult<SessionSummary> {
        tracing::info!(
            source = %self.source.name(),
            detector = %self.detector.name(),
            pointer = %self.pointer.name(),
            "Control session started"
        );

        let mut summary = SessionSummary::default();
        let result = self.run_loop(&mut summary);

        if let Err(e) = self.source.release() {
            tracing::warn!(error = %e, "Failed to release frame source");
        }
        if let Some(recorder) = self.recorder.as_mut() {
            match recorder.flush() {
                Ok(()) => tracing::info!(
                    frames = recorder.frames_written(),
                    path = %recorder.path().display(),
                    "Recording saved"
                ),
                // the loop error is the one to report
                Err(e) if result.is_err() => {
                    tracing::warn!(error = %e, "Failed to flush recording");
                }
                Err(e) => return Err(e),
            }
        }
        result?;

        tracing::info!(
            frames = summary.frames,
            hand_frames = summary.hand_frames,
            moves = summary.moves,
            left_clicks = summary.left_clicks,
            right_clicks = summary.right_clicks,
            "Control session stopped"
        );
        Ok(summary)
    }

    fn run_loop(&mut self, summary: &mut SessionSummary) -> HandmouseResult<()> {
        let mut fps = FpsMeter::per_second();

        loop {
            if self.stop.load(Ordering::SeqCst) {
                tracing::info!("Stop requested");
                return Ok(());
            }

            let Some(frame) = self.source.read()? else {
                tracing::info!("Frame source exhausted");
                return Ok(());
            };

            let landmarks = self.detector.detect(&frame)?;
            if let Some(recorder) = self.recorder.as_mut() {
                recorder.write_frame(self.clock.elapsed_ns(), &landmarks)?;
            }

            let outcome = self.controller.process(&landmarks);
            summary.frames += 1;
            if outcome.state == TrackingState::HandTracking {
                summary.hand_frames += 1;
            }

            for action in &outcome.actions {
                tracing::debug!(?action, "Pointer action");
                if let Err(e) = self.pointer.apply(action) {
                    tracing::warn!(error = %e, ?action, "Pointer action failed");
                }
                summary.count(action);
                if action.is_click() && !self.click_debounce.is_zero() {
                    std::thread::sleep(self.click_debounce);
                }
            }

            let overlay = Overlay::from_landmarks(&landmarks, self.controller.zone());
            if self.view.show(&frame, &overlay)? == ViewSignal::Quit {
                tracing::info!("Quit requested from debug view");
                return Ok(());
            }

            if let Some(rate) = fps.tick(self.clock.elapsed_ns()) {
                tracing::debug!(fps = rate, "Frame rate");
            }
        }
    }

    /// The controller, for inspecting cursor state after a run.
    pub fn controller(&self) -> &GestureController {
        &self.controller
    }
}
