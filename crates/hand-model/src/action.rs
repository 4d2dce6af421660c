//! Pointer actions emitted by the gesture controller.

use serde::{Deserialize, Serialize};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
}

/// A single instruction for the OS pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerAction {
    /// Move the cursor to absolute screen coordinates.
    Move { x: f64, y: f64 },

    /// Press and release a button at the current cursor position.
    Click { button: MouseButton },
}

impl PointerAction {
    pub fn click(button: MouseButton) -> Self {
        Self::Click { button }
    }

    pub fn is_click(&self) -> bool {
        matches!(self, Self::Click { .. })
    }
}
