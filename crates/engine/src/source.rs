//! Frame sources.

use handmouse_common::config::CameraConfig;
use handmouse_common::error::HandmouseResult;

use crate::frame::Frame;

/// Trait for anything that produces frames for the control loop.
pub trait FrameSource {
    /// Read the next frame. `None` ends the session.
    fn read(&mut self) -> HandmouseResult<Option<Frame>>;

    /// Source name for logging.
    fn name(&self) -> &str;

    /// Release the underlying device.
    fn release(&mut self) -> HandmouseResult<()> {
        Ok(())
    }
}

/// Open the configured camera.
#[cfg(feature = "opencv")]
pub fn open_camera(config: &CameraConfig) -> HandmouseResult<Box<dyn FrameSource>> {
    Ok(Box::new(crate::camera::OpencvCamera::open(config)?))
}

/// Open the configured camera.
#[cfg(not(feature = "opencv"))]
pub fn open_camera(config: &CameraConfig) -> HandmouseResult<Box<dyn FrameSource>> {
    Err(handmouse_common::error::HandmouseError::unsupported(format!(
        "cannot open camera {}: handmouse was built without the `opencv` feature",
        config.device_index
    )))
}
