//! Handmouse Hand Model
//!
//! Data types shared by the detector adapter, the gesture core, and the
//! pointer backends:
//!
//! - `landmark`: one detected hand as pixel-space landmarks
//! - `geometry`: pixel points and rectangles
//! - `action`: pointer actions emitted by the controller
//! - `recording`: the JSONL landmark recording format

pub mod action;
pub mod geometry;
pub mod landmark;
pub mod recording;

pub use action::{MouseButton, PointerAction};
pub use geometry::{PixelRect, Point2D};
pub use landmark::{Landmark, LandmarkSet};
