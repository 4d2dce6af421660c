//! Hand landmarks in pixel space.
//!
//! Ids follow the 21-point MediaPipe hand convention: the wrist is 0 and
//! each finger contributes four points from its base joint to its tip.
//! Points are looked up by their `id`, whatever their order in the set.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Landmark ids used by the gesture logic.
pub mod ids {
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;

    /// Number of points the detector reports for one hand.
    pub const HAND_POINTS: usize = 21;

    /// Tips drawn on the debug view: thumb, index, middle.
    pub const TRACKED_TIPS: [usize; 3] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP];
}

/// One landmark of the detected hand, in pixels of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: usize,
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub fn new(id: usize, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }
}

/// All landmarks of one hand for one frame. Empty when no hand was found.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    /// The "no hand in this frame" set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from landmarks in any order.
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Convert normalized `[0, 1]` detector coordinates to pixels of a
    /// `width x height` frame. Fractions are truncated toward zero.
    pub fn from_normalized<I>(points: I, width: u32, height: u32) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let landmarks = points
            .into_iter()
            .enumerate()
            .map(|(id, (nx, ny))| {
                Landmark::new(id, (nx * width as f32) as i32, (ny * height as f32) as i32)
            })
            .collect();
        Self { landmarks }
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Landmark with the given id, if present.
    ///
    /// Detector output is in id order, so the point at position `id` is
    /// checked first.
    pub fn get(&self, id: usize) -> Option<&Landmark> {
        match self.landmarks.get(id) {
            Some(landmark) if landmark.id == id => Some(landmark),
            _ => self.landmarks.iter().find(|l| l.id == id),
        }
    }

    /// Pixel position of the given id.
    pub fn point(&self, id: usize) -> Option<Point2D> {
        self.get(id).map(Landmark::point)
    }

    /// Thumb, index and middle tips that are present in this set.
    pub fn tracked_tips(&self) -> impl Iterator<Item = &Landmark> {
        ids::TRACKED_TIPS.iter().filter_map(|&id| self.get(id))
    }
}
