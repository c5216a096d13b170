//! Exponential backoff without jitter.

use std::time::Duration;

/// Growth factor applied after every wait.
pub const BACKOFF_MULTIPLIER: f64 = 1.7;

/// Backoff schedule for one retry sequence.
///
/// Starts at the configured base and multiplies by [`BACKOFF_MULTIPLIER`]
/// each time [`Backoff::advance`] is called. There is no ceiling.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
}

impl Backoff {
    pub fn new(base: Duration) -> Self {
        Self { current: base }
    }

    /// Delay to wait before the next attempt.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Grow the delay for the following wait.
    pub fn advance(&mut self) {
        self.current = self.current.mul_f64(BACKOFF_MULTIPLIER);
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.current;
        self.advance();
        Some(delay)
    }
}
