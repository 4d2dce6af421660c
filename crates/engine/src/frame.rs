//! Captured video frames.

use handmouse_common::error::{HandmouseError, HandmouseResult};

/// One frame of packed 8-bit pixels in BGR order.
///
/// Replayed frames carry only their size; `data` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap pixel data, checking it matches the stated geometry.
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> HandmouseResult<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(HandmouseError::camera(format!(
                "frame data is {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A frame with a size but no pixels.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: 3,
            data: Vec::new(),
        }
    }

    pub fn has_pixels(&self) -> bool {
        !self.data.is_empty()
    }
}
