//! Handmouse Engine
//!
//! Runs the real-time control loop: frames come from a camera (or a
//! replayed recording), the external landmark model locates the hand, the
//! gesture controller decides what to do, and a pointer backend does it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ControlSession                       │
//! │  ┌────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │ FrameSource│─▶│LandmarkDetec.│─▶│GestureController │  │
//! │  └────────────┘  └──────┬───────┘  └────────┬─────────┘  │
//! │                         │                   │            │
//! │                         ▼                   ▼            │
//! │               ┌────────────────┐  ┌──────────────────┐   │
//! │               │ LandmarkWriter │  │ PointerBackend   │   │
//! │               └────────────────┘  └──────────────────┘   │
//! │                         DebugView                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! OpenCV-backed capture and display are only compiled with the `opencv`
//! feature. Without it, live capture is unsupported and the view is
//! headless; replays still work.

pub mod detector;
pub mod frame;
pub mod recorder;
pub mod replay;
pub mod session;
pub mod source;
pub mod view;

#[cfg(feature = "opencv")]
pub mod camera;

pub use detector::{LandmarkDetector, MediapipeDetector};
pub use frame::Frame;
pub use recorder::LandmarkWriter;
pub use replay::{load_recording, replay_recording, ReplayDetector, ReplayFrames};
pub use session::{ControlSession, SessionSummary};
pub use source::{open_camera, FrameSource};
pub use view::{open_view, DebugView, HeadlessView, Overlay, ViewSignal};

/// Whether this build can capture from a camera and open a window.
pub const OPENCV_ENABLED: bool = cfg!(feature = "opencv");
