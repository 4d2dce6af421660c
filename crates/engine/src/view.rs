//! Debug view: the processed frame with fingertip markers and the gesture
//! zone, shown mirrored so the user's hand moves like in a mirror.

use handmouse_common::config::DisplayConfig;
use handmouse_common::error::HandmouseResult;
use handmouse_hand_model::geometry::PixelRect;
use handmouse_hand_model::landmark::{Landmark, LandmarkSet};

use crate::frame::Frame;

/// What the view asks the session to do after showing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSignal {
    Continue,
    Quit,
}

/// Markers drawn over a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overlay {
    /// Fingertips to mark.
    pub tips: Vec<Landmark>,

    /// Gesture zone outline; only drawn while a hand is tracked.
    pub zone: Option<PixelRect>,
}

impl Overlay {
    pub fn from_landmarks(landmarks: &LandmarkSet, zone: PixelRect) -> Self {
        if landmarks.is_empty() {
            return Self::default();
        }
        Self {
            tips: landmarks.tracked_tips().copied().collect(),
            zone: Some(zone),
        }
    }
}

/// Trait for debug views.
pub trait DebugView {
    /// Show one frame with its overlay.
    fn show(&mut self, frame: &Frame, overlay: &Overlay) -> HandmouseResult<ViewSignal>;
}

/// View that shows nothing and never asks to quit.
#[derive(Debug, Default)]
pub struct HeadlessView;

impl DebugView for HeadlessView {
    fn show(&mut self, _frame: &Frame, _overlay: &Overlay) -> HandmouseResult<ViewSignal> {
        Ok(ViewSignal::Continue)
    }
}

/// Open the debug view the configuration asks for.
pub fn open_view(config: &DisplayConfig) -> HandmouseResult<Box<dyn DebugView>> {
    if !config.enabled {
        return Ok(Box::new(HeadlessView));
    }

    #[cfg(feature = "opencv")]
    {
        Ok(Box::new(window::OpencvView::open(&config.window_title)?))
    }

    #[cfg(not(feature = "opencv"))]
    {
        tracing::warn!("Built without the `opencv` feature; running without a debug window");
        Ok(Box::new(HeadlessView))
    }
}

#[cfg(feature = "opencv")]
mod window {
    use opencv::core::{self, Mat, Point, Rect, Scalar, CV_8UC3};
    use opencv::highgui;
    use opencv::imgproc;
    use opencv::prelude::*;

    use handmouse_common::error::{HandmouseError, HandmouseResult};

    use super::{DebugView, Overlay, ViewSignal};
    use crate::frame::Frame;

    const QUIT_KEY: i32 = b' ' as i32;

    fn cv_error(context: &'static str) -> impl FnOnce(opencv::Error) -> HandmouseError {
        move |e| HandmouseError::display(format!("{context}: {e}"))
    }

    /// An OpenCV highgui window. Space closes it.
    pub struct OpencvView {
        title: String,
    }

    impl OpencvView {
        pub fn open(title: &str) -> HandmouseResult<Self> {
            highgui::named_window(title, highgui::WINDOW_AUTOSIZE)
                .map_err(cv_error("Failed to open window"))?;
            Ok(Self {
                title: title.to_string(),
            })
        }
    }

    impl DebugView for OpencvView {
        fn show(&mut self, frame: &Frame, overlay: &Overlay) -> HandmouseResult<ViewSignal> {
            let mut canvas = Mat::new_rows_cols_with_default(
                frame.height as i32,
                frame.width as i32,
                CV_8UC3,
                Scalar::all(0.0),
            )
            .map_err(cv_error("Failed to allocate canvas"))?;

            if frame.has_pixels() && frame.channels == 3 {
                canvas
                    .data_bytes_mut()
                    .map_err(cv_error("Failed to access canvas"))?
                    .copy_from_slice(&frame.data);
            }

            for tip in &overlay.tips {
                imgproc::circle(
                    &mut canvas,
                    Point::new(tip.x, tip.y),
                    5,
                    Scalar::new(0.0, 255.0, 0.0, 0.0),
                    imgproc::FILLED,
                    imgproc::LINE_8,
                    0,
                )
                .map_err(cv_error("Failed to draw fingertip"))?;
            }

            if let Some(zone) = overlay.zone {
                imgproc::rectangle(
                    &mut canvas,
                    Rect::new(
                        zone.left as i32,
                        zone.top as i32,
                        zone.width() as i32,
                        zone.height() as i32,
                    ),
                    Scalar::new(255.0, 0.0, 255.0, 0.0),
                    2,
                    imgproc::LINE_8,
                    0,
                )
                .map_err(cv_error("Failed to draw gesture zone"))?;
            }

            let mut mirrored = Mat::default();
            core::flip(&canvas, &mut mirrored, 1).map_err(cv_error("Failed to flip frame"))?;
            highgui::imshow(&self.title, &mirrored).map_err(cv_error("Failed to show frame"))?;

            let key = highgui::wait_key(1).map_err(cv_error("Failed to poll keyboard"))?;
            if key >= 0 && key & 0xFF == QUIT_KEY {
                return Ok(ViewSignal::Quit);
            }
            Ok(ViewSignal::Continue)
        }
    }

    impl Drop for OpencvView {
        fn drop(&mut self) {
            let _ = highgui::destroy_window(&self.title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handmouse_hand_model::landmark::ids;

    #[test]
    fn test_overlay_is_empty_without_a_hand() {
        let zone = PixelRect::new(100.0, 100.0, 600.0, 400.0);
        let overlay = Overlay::from_landmarks(&LandmarkSet::empty(), zone);
        assert_eq!(overlay, Overlay::default());
    }

    #[test]
    fn test_overlay_marks_tracked_tips_and_zone() {
        let zone = PixelRect::new(100.0, 100.0, 600.0, 400.0);
        let set = LandmarkSet::new(
            (0..ids::HAND_POINTS)
                .map(|id| Landmark::new(id, id as i32, 0))
                .collect(),
        );
        let overlay = Overlay::from_landmarks(&set, zone);
        let tips: Vec<usize> = overlay.tips.iter().map(|l| l.id).collect();
        assert_eq!(tips, ids::TRACKED_TIPS.to_vec());
        assert_eq!(overlay.zone, Some(zone));
    }

    #[test]
    fn test_disabled_display_is_headless() {
        let config = DisplayConfig {
            enabled: false,
            ..DisplayConfig::default()
        };
        let mut view = open_view(&config).unwrap();
        let signal = view.show(&Frame::blank(10, 10), &Overlay::default()).unwrap();
        assert_eq!(signal, ViewSignal::Continue);
    }
}
