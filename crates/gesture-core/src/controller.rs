//! Per-frame gesture control state machine.
//!
//! Each frame the controller receives the landmark set from the detector
//! and answers with the pointer actions to perform:
//!
//! - index up, middle down: move the cursor (mapped, then smoothed)
//! - thumb and index up, tips pinched: left click
//! - thumb and middle up, tips pinched: right click
//!
//! The rules are independent and are evaluated in that order. A frame
//! without a hand, or with too few landmarks, produces no actions and
//! leaves the cursor state untouched.

use handmouse_common::config::GestureConfig;
use handmouse_hand_model::action::{MouseButton, PointerAction};
use handmouse_hand_model::geometry::{PixelRect, Point2D};
use handmouse_hand_model::landmark::{ids, LandmarkSet};

use crate::cursor_smooth::{CursorSmoother, CursorState};
use crate::fingers::{distance, FingerState};
use crate::mapping::ZoneMapper;

/// Whether the last frame had a hand in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    NoHand,
    HandTracking,
}

/// Everything the controller decided for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutcome {
    pub state: TrackingState,

    /// Finger classification; `None` when the frame could not be classified.
    pub fingers: Option<FingerState>,

    /// Actions to apply, in order.
    pub actions: Vec<PointerAction>,
}

/// The gesture controller. Owns the persistent cursor state.
#[derive(Debug, Clone)]
pub struct GestureController {
    mapper: ZoneMapper,
    smoother: CursorSmoother,
    click_distance_px: f64,
    mirror_x: bool,
    state: TrackingState,
}

impl GestureController {
    /// Create a controller for frames of `frame_size` driving a screen of
    /// `screen_size`, both `(width, height)` in pixels.
    pub fn new(config: &GestureConfig, frame_size: (u32, u32), screen_size: (u32, u32)) -> Self {
        Self {
            mapper: ZoneMapper::new(
                frame_size.0,
                frame_size.1,
                config.frame_reduction,
                screen_size.0,
                screen_size.1,
            ),
            smoother: CursorSmoother::new(config.smoothening),
            click_distance_px: config.click_distance_px,
            mirror_x: config.mirror_x,
            state: TrackingState::NoHand,
        }
    }

    /// Process the landmarks of one frame.
    pub fn process(&mut self, landmarks: &LandmarkSet) -> FrameOutcome {
        let state = if landmarks.is_empty() {
            TrackingState::NoHand
        } else {
            TrackingState::HandTracking
        };
        if state != self.state {
            tracing::debug!(from = ?self.state, to = ?state, "Tracking state changed");
            self.state = state;
        }

        let Some(fingers) = FingerState::classify(landmarks) else {
            if state == TrackingState::HandTracking {
                tracing::trace!(points = landmarks.len(), "Landmark set too short, skipping");
            }
            return FrameOutcome {
                state,
                fingers: None,
                actions: Vec::new(),
            };
        };

        let mut actions = Vec::new();

        if fingers.is_pointing() {
            if let Some(tip) = landmarks.point(ids::INDEX_TIP) {
                actions.push(self.move_toward(tip));
            }
        }

        if fingers.thumb && fingers.index && self.pinched(landmarks, ids::INDEX_TIP) {
            actions.push(PointerAction::click(MouseButton::Left));
        }

        if fingers.thumb && fingers.middle && self.pinched(landmarks, ids::MIDDLE_TIP) {
            actions.push(PointerAction::click(MouseButton::Right));
        }

        FrameOutcome {
            state,
            fingers: Some(fingers),
            actions,
        }
    }

    fn move_toward(&mut self, tip: Point2D) -> PointerAction {
        let zone = self.mapper.zone();
        if !zone.contains(tip) {
            tracing::trace!(x = tip.x, y = tip.y, "Fingertip outside gesture zone, clamping");
        }

        let target = self.mapper.map(tip);
        let smoothed = self.smoother.update(target);
        let x = if self.mirror_x {
            self.mapper.screen_width() - smoothed.x
        } else {
            smoothed.x
        };
        PointerAction::Move { x, y: smoothed.y }
    }

    fn pinched(&self, landmarks: &LandmarkSet, tip: usize) -> bool {
        let length = distance(landmarks, tip, ids::THUMB_TIP);
        tracing::trace!(tip, length, "Pinch distance");
        length < self.click_distance_px
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Smoothed cursor state, before mirroring.
    pub fn cursor(&self) -> CursorState {
        self.smoother.state()
    }

    /// The gesture zone in frame pixels.
    pub fn zone(&self) -> PixelRect {
        self.mapper.zone()
    }
}
