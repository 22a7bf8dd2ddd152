//! Monotonic stopwatch producing per-frame delta time.

use std::time::{Duration, Instant};

/// Measures time between successive `step` calls.
///
/// Delta time is clamped so a debugger pause or a stalled terminal does not
/// teleport the ball through a paddle on the next frame.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    last: Instant,
    dt_max: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::with_max_step(Duration::from_millis(100))
    }

    pub fn with_max_step(dt_max: Duration) -> Self {
        Self {
            last: Instant::now(),
            dt_max,
        }
    }

    /// Seconds since the previous step (or construction), clamped.
    pub fn step(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;
        dt.as_secs_f32()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
