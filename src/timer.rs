//! Monotonic per-request latency measurement.

use std::time::Instant;

/// Start token captured when a request enters the pipeline.
///
/// Backed by [`Instant`], so wall-clock adjustments never distort the
/// reported `response-time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timer {
    started: Instant,
}

impl Timer {
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Milliseconds since [`Timer::start`], keeping sub-millisecond precision.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}
