//! Handmouse Gesture Core
//!
//! Turns per-frame hand landmarks into pointer actions:
//! - **Fingers:** thumb/index/middle up-down classification and tip distances
//! - **Mapping:** gesture zone of the camera frame to screen coordinates
//! - **Cursor Smoothing:** first-order filter against landmark jitter
//! - **Controller:** the `NoHand` / `HandTracking` state machine
//!
//! This crate is pure computation with no I/O.
//! Click debouncing is left to the caller, which owns the clock.

pub mod controller;
pub mod cursor_smooth;
pub mod fingers;
pub mod mapping;

pub use controller::{FrameOutcome, GestureController, TrackingState};
pub use cursor_smooth::{CursorSmoother, CursorState};
pub use fingers::{distance, FingerState};
pub use mapping::ZoneMapper;
