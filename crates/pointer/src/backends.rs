//! Pointer backend implementations.

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

use handmouse_common::error::{HandmouseError, HandmouseResult};
use handmouse_hand_model::action::{MouseButton, PointerAction};

use crate::PointerBackend;

/// Screen size assumed when the display cannot be queried.
pub const FALLBACK_SCREEN: (u32, u32) = (1920, 1080);

/// OS mouse through enigo.
pub struct EnigoBackend {
    enigo: Enigo,
}

impl EnigoBackend {
    pub fn new() -> HandmouseResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| HandmouseError::pointer(format!("Failed to connect to display: {e}")))?;
        Ok(Self { enigo })
    }
}

impl PointerBackend for EnigoBackend {
    fn move_to(&mut self, x: i32, y: i32) -> HandmouseResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| HandmouseError::pointer(format!("Failed to move cursor: {e}")))
    }

    fn click(&mut self, button: MouseButton) -> HandmouseResult<()> {
        let button = match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
        };
        self.enigo
            .button(button, Direction::Click)
            .map_err(|e| HandmouseError::pointer(format!("Failed to click {button:?}: {e}")))
    }

    fn screen_size(&self) -> HandmouseResult<(u32, u32)> {
        let (w, h) = self
            .enigo
            .main_display()
            .map_err(|e| HandmouseError::pointer(format!("Failed to query display size: {e}")))?;
        if w <= 0 || h <= 0 {
            return Err(HandmouseError::pointer(format!(
                "Display reported an invalid size {w}x{h}"
            )));
        }
        Ok((w as u32, h as u32))
    }

    fn name(&self) -> &str {
        "enigo"
    }
}

/// Backend that only records what it was asked to do.
pub struct StubPointer {
    screen: (u32, u32),
    applied: Vec<PointerAction>,
}

impl StubPointer {
    /// Create a stub reporting the given screen size.
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen: (screen_width, screen_height),
            applied: Vec::new(),
        }
    }

    /// Every action received so far, in order.
    pub fn actions(&self) -> &[PointerAction] {
        &self.applied
    }
}

impl Default for StubPointer {
    fn default() -> Self {
        Self::new(FALLBACK_SCREEN.0, FALLBACK_SCREEN.1)
    }
}

impl PointerBackend for StubPointer {
    fn move_to(&mut self, x: i32, y: i32) -> HandmouseResult<()> {
        tracing::debug!(x, y, "stub move");
        self.applied.push(PointerAction::Move {
            x: x as f64,
            y: y as f64,
        });
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> HandmouseResult<()> {
        tracing::debug!(?button, "stub click");
        self.applied.push(PointerAction::click(button));
        Ok(())
    }

    fn screen_size(&self) -> HandmouseResult<(u32, u32)> {
        Ok(self.screen)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Pick the real OS backend, or the stub when `dry_run` is set or the
/// display connection fails.
pub fn detect_best_backend(dry_run: bool) -> Box<dyn PointerBackend> {
    if dry_run {
        tracing::info!("Dry run: pointer actions will be logged, not performed");
        return Box::new(StubPointer::default());
    }

    match EnigoBackend::new() {
        Ok(backend) => {
            tracing::info!("Using enigo pointer backend");
            Box::new(backend)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to initialize enigo backend, using stub; the cursor will not move"
            );
            Box::new(StubPointer::default())
        }
    }
}
