//! Handmouse Pointer Output
//!
//! Applies controller actions to a mouse. Uses a pluggable backend
//! architecture:
//!
//! - **Enigo:** injects real cursor motion and clicks into the OS
//! - **Stub:** records actions without touching the OS (dry runs, tests)

pub mod backends;

use handmouse_common::error::HandmouseResult;
use handmouse_hand_model::action::{MouseButton, PointerAction};

pub use backends::{detect_best_backend, EnigoBackend, StubPointer};

/// Trait for mouse output backends.
pub trait PointerBackend {
    /// Move the cursor to absolute screen pixels.
    fn move_to(&mut self, x: i32, y: i32) -> HandmouseResult<()>;

    /// Press and release a button at the current position.
    fn click(&mut self, button: MouseButton) -> HandmouseResult<()>;

    /// Size of the main display in pixels.
    fn screen_size(&self) -> HandmouseResult<(u32, u32)>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Apply one controller action.
    fn apply(&mut self, action: &PointerAction) -> HandmouseResult<()> {
        match *action {
            PointerAction::Move { x, y } => self.move_to(x.round() as i32, y.round() as i32),
            PointerAction::Click { button } => self.click(button),
        }
    }
}
