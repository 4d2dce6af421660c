//! Mapping from the camera's gesture zone to screen coordinates.

use handmouse_hand_model::geometry::{PixelRect, Point2D};

/// Piecewise-linear interpolation of `value` from `from` onto `to`,
/// clamped to the ends of `to` outside the input range.
pub fn interp(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (x0, x1) = from;
    let (y0, y1) = to;
    if value <= x0 {
        return y0;
    }
    if value >= x1 {
        return y1;
    }
    y0 + (value - x0) * (y1 - y0) / (x1 - x0)
}

/// Maps fingertip pixels inside an inset zone of the frame onto the screen.
///
/// The inset lets the hand reach every screen edge without leaving the
/// camera's view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneMapper {
    zone: PixelRect,
    screen: PixelRect,
}

impl ZoneMapper {
    /// Zone inset by `frame_reduction` pixels on every side of a
    /// `frame_width x frame_height` frame, mapped onto a
    /// `screen_width x screen_height` screen.
    pub fn new(
        frame_width: u32,
        frame_height: u32,
        frame_reduction: u32,
        screen_width: u32,
        screen_height: u32,
    ) -> Self {
        Self {
            zone: PixelRect::from_size(frame_width as f64, frame_height as f64)
                .inset(frame_reduction as f64),
            screen: PixelRect::from_size(screen_width as f64, screen_height as f64),
        }
    }

    /// Screen position for a frame position.
    pub fn map(&self, p: Point2D) -> Point2D {
        Point2D::new(
            interp(
                p.x,
                (self.zone.left, self.zone.right),
                (self.screen.left, self.screen.right),
            ),
            interp(
                p.y,
                (self.zone.top, self.zone.bottom),
                (self.screen.top, self.screen.bottom),
            ),
        )
    }

    /// The active zone in frame pixels.
    pub fn zone(&self) -> PixelRect {
        self.zone
    }

    pub fn screen_width(&self) -> f64 {
        self.screen.width()
    }
}
