//! Post-call throttle.
//!
//! Some free-tier backends enforce a low requests-per-minute ceiling. The
//! throttle inserts a fixed pause after every successful call; it does not
//! observe actual limits.

use std::time::Duration;
use tracing::trace;

/// Fixed delay applied after each successful call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    /// Throttle with the given post-call delay
    #[must_use]
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    /// No throttling
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Configured post-call delay
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the throttle ever sleeps
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.delay.is_zero()
    }

    /// Sleep for the configured delay
    pub async fn pause(&self) {
        if self.is_enabled() {
            trace!(delay_ms = self.delay.as_millis() as u64, "Throttling after call");
            tokio::time::sleep(self.delay).await;
        }
    }
}
