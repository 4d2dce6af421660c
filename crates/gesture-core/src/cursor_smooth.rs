//! Cursor motion smoothing.
//!
//! Landmark positions jitter by a few pixels between frames even when the
//! hand is still. Each update moves the cursor a fixed fraction of the way
//! toward the new target: `new = prev + (target - prev) / factor`.

use handmouse_hand_model::geometry::Point2D;

/// Previous and current smoothed cursor positions, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub previous: Point2D,
    pub current: Point2D,
}

/// Online first-order smoothing filter.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    factor: f64,
    state: CursorState,
}

impl CursorSmoother {
    /// Create a smoother starting at the screen origin.
    ///
    /// `factor` is clamped to at least 1.0; 1.0 follows the target exactly.
    pub fn new(factor: f64) -> Self {
        Self {
            factor: factor.max(1.0),
            state: CursorState::default(),
        }
    }

    /// Advance toward `target` and return the new position.
    pub fn update(&mut self, target: Point2D) -> Point2D {
        let prev = self.state.current;
        let next = Point2D::new(
            smooth_step(prev.x, target.x, self.factor),
            smooth_step(prev.y, target.y, self.factor),
        );
        self.state = CursorState {
            previous: prev,
            current: next,
        };
        next
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

/// One filter step on a single axis.
pub fn smooth_step(previous: f64, target: f64, factor: f64) -> f64 {
    previous + (target - previous) / factor
}
