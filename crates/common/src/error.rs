//! Error types shared across handmouse crates.

use std::path::PathBuf;

/// Top-level error type for handmouse operations.
///
/// A missing hand or a short landmark set is never an error; those frames
/// are no-ops in the control loop.
#[derive(Debug, thiserror::Error)]
pub enum HandmouseError {
    #[error("Camera error: {message}")]
    Camera { message: String },

    #[error("Detector error: {message}")]
    Detector { message: String },

    #[error("Pointer error: {message}")]
    Pointer { message: String },

    #[error("Display error: {message}")]
    Display { message: String },

    #[error("Recording error: {message}")]
    Recording { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandmouseError.
pub type HandmouseResult<T> = Result<T, HandmouseError>;

impl HandmouseError {
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera {
            message: msg.into(),
        }
    }

    pub fn detector(msg: impl Into<String>) -> Self {
        Self::Detector {
            message: msg.into(),
        }
    }

    pub fn pointer(msg: impl Into<String>) -> Self {
        Self::Pointer {
            message: msg.into(),
        }
    }

    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display {
            message: msg.into(),
        }
    }

    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
