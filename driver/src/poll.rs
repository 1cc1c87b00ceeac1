//! Readiness polling: pacing configuration and the delay seam.

use core::time::Duration;

/// How the driver paces its readiness polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollStrategy {
    /// Pause between consecutive status queries.
    pub interval: Duration,
}

impl Default for PollStrategy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
        }
    }
}

/// Blocking pause between status queries.
///
/// The driver never reads a wall clock: elapsed time is accounted as the
/// sum of delays it performed. Tests substitute a recording fake and
/// observe the exact wait schedule without real sleeps.
pub trait Delay {
    fn delay(&mut self, interval: Duration);
}

/// Production delay backed by the OS scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}
