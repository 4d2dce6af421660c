//! OpenCV camera capture.

use opencv::core::{Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::videoio::{
    self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH,
};

use handmouse_common::config::CameraConfig;
use handmouse_common::error::{HandmouseError, HandmouseResult};

use crate::frame::Frame;
use crate::source::FrameSource;

fn cv_error(context: &'static str) -> impl FnOnce(opencv::Error) -> HandmouseError {
    move |e| HandmouseError::camera(format!("{context}: {e}"))
}

/// A webcam read through OpenCV. Frames are resized to the configured size.
pub struct OpencvCamera {
    capture: VideoCapture,
    device_index: i32,
    width: u32,
    height: u32,
}

impl OpencvCamera {
    pub fn open(config: &CameraConfig) -> HandmouseResult<Self> {
        tracing::info!(device = config.device_index, "Opening camera");
        let mut capture = VideoCapture::new(config.device_index, videoio::CAP_ANY)
            .map_err(cv_error("Failed to open camera"))?;

        if !capture.is_opened().map_err(cv_error("Failed to query camera"))? {
            return Err(HandmouseError::camera(format!(
                "camera {} could not be opened",
                config.device_index
            )));
        }

        capture
            .set(CAP_PROP_FRAME_WIDTH, config.width as f64)
            .map_err(cv_error("Failed to set frame width"))?;
        capture
            .set(CAP_PROP_FRAME_HEIGHT, config.height as f64)
            .map_err(cv_error("Failed to set frame height"))?;
        // keep only the newest frame
        capture
            .set(CAP_PROP_BUFFERSIZE, 1.0)
            .map_err(cv_error("Failed to set buffer size"))?;

        Ok(Self {
            capture,
            device_index: config.device_index,
            width: config.width,
            height: config.height,
        })
    }
}

impl FrameSource for OpencvCamera {
    fn read(&mut self) -> HandmouseResult<Option<Frame>> {
        let mut raw = Mat::default();
        let ok = self
            .capture
            .read(&mut raw)
            .map_err(cv_error("Failed to read frame"))?;
        if !ok || raw.empty() {
            tracing::warn!(device = self.device_index, "Camera returned no frame");
            return Ok(None);
        }

        let mut resized = Mat::default();
        imgproc::resize(
            &raw,
            &mut resized,
            Size::new(self.width as i32, self.height as i32),
            0.0,
            0.0,
            imgproc::INTER_CUBIC,
        )
        .map_err(cv_error("Failed to resize frame"))?;

        let data = resized
            .data_bytes()
            .map_err(cv_error("Failed to access frame data"))?
            .to_vec();
        Frame::new(self.width, self.height, resized.channels() as u32, data).map(Some)
    }

    fn name(&self) -> &str {
        "opencv-camera"
    }

    fn release(&mut self) -> HandmouseResult<()> {
        tracing::info!(device = self.device_index, "Releasing camera");
        self.capture
            .release()
            .map_err(cv_error("Failed to release camera"))
    }
}
