//! Clock and timing utilities for the control loop.
//!
//! A session is anchored to a monotonic epoch captured when it starts.
//! Landmark recordings timestamp frames relative to that epoch, and the
//! FPS meter reports throughput over fixed windows.

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Nanoseconds elapsed since the session started.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Counts frames and reports the average rate once per window.
#[derive(Debug)]
pub struct FpsMeter {
    window_ns: u64,
    window_start_ns: Option<u64>,
    frames: u32,
}

impl FpsMeter {
    /// Create a meter reporting once every `window_ns` nanoseconds.
    pub fn new(window_ns: u64) -> Self {
        Self {
            window_ns: window_ns.max(1),
            window_start_ns: None,
            frames: 0,
        }
    }

    /// Meter with a one second window.
    pub fn per_second() -> Self {
        Self::new(1_000_000_000)
    }

    /// Record one frame at `now_ns`.
    ///
    /// Returns the average FPS when the current window has elapsed, and
    /// starts a new window. The first call only opens a window.
    pub fn tick(&mut self, now_ns: u64) -> Option<f64> {
        let Some(start) = self.window_start_ns else {
            self.window_start_ns = Some(now_ns);
            self.frames = 0;
            return None;
        };

        self.frames += 1;
        let elapsed = now_ns.saturating_sub(start);
        if elapsed < self.window_ns {
            return None;
        }

        let fps = self.frames as f64 / SessionClock::ns_to_secs(elapsed);
        self.window_start_ns = Some(now_ns);
        self.frames = 0;
        Some(fps)
    }
}
