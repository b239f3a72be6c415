//! Fixed-delay request pacing
//!
//! Every fetch is preceded by the same pause, regardless of how long the
//! previous request took. There is no backoff and no token bucket.

use std::time::Duration;

/// Inserts a fixed pause before each request
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Creates a pacer that waits `delay_ms` milliseconds before each request
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Returns the configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the configured delay
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
