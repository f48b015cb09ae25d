//! Retry policy with exponential backoff.
//!
//! Every retryable failure is treated the same way: the whole operation is
//! re-run until it succeeds or the attempt ceiling is reached, sleeping an
//! exponentially growing, bounded delay between attempts.

use gateway_core::{GatewayError, GatewayResult};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Lower bound for any delay
    pub min_delay: Duration,
    /// Upper bound for any delay
    pub max_delay: Duration,
    /// Backoff multiplier
    pub multiplier: f64,
    /// Jitter factor (0.0 - 1.0)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(2),
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: 0.0,
        }
    }
}

/// Attempt bookkeeping for one retried operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryReport {
    /// Number of times the operation was invoked
    pub attempts: u32,
    /// Delays slept between attempts, in order
    pub delays: Vec<Duration>,
}

impl RetryReport {
    /// Number of retries (attempts after the first)
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Result of a retry operation
#[derive(Debug)]
pub enum RetryResult<T> {
    /// Operation succeeded
    Success {
        /// The value produced
        value: T,
        /// Attempt bookkeeping
        report: RetryReport,
    },
    /// Operation failed on every allowed attempt
    Exhausted {
        /// The final error
        error: GatewayError,
        /// Attempt bookkeeping
        report: RetryReport,
    },
    /// Operation failed with an error that is never retried
    NonRetryable {
        /// The error
        error: GatewayError,
        /// Attempt bookkeeping
        report: RetryReport,
    },
}

impl<T> RetryResult<T> {
    /// Convert to a Result
    ///
    /// # Errors
    /// Returns the error if the operation failed
    pub fn into_result(self) -> GatewayResult<T> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Exhausted { error, .. } | Self::NonRetryable { error, .. } => Err(error),
        }
    }

    /// Check if the operation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Attempt bookkeeping
    #[must_use]
    pub fn report(&self) -> &RetryReport {
        match self {
            Self::Success { report, .. }
            | Self::Exhausted { report, .. }
            | Self::NonRetryable { report, .. } => report,
        }
    }
}

/// Retry policy implementation
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration
    #[must_use]
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Create a policy with a custom attempt ceiling
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self::new(RetryConfig {
            max_attempts,
            ..Default::default()
        })
    }

    /// A policy that never retries
    #[must_use]
    pub fn disabled() -> Self {
        Self::with_max_attempts(1)
    }

    /// Calculate the delay slept after the given failed attempt (0-indexed)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.config.base_delay.as_millis() as f64;
        let delay = base * self.config.multiplier.powi(attempt as i32);
        let delay = delay
            .min(self.config.max_delay.as_millis() as f64)
            .max(self.config.min_delay.as_millis() as f64);

        let final_delay = if self.config.jitter > 0.0 {
            let jitter_range = delay * self.config.jitter;
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (delay + jitter).max(0.0)
        } else {
            delay
        };

        Duration::from_millis(final_delay as u64)
    }

    /// Check if an error is retryable
    #[must_use]
    pub fn is_retryable(&self, error: &GatewayError) -> bool {
        error.is_retryable()
    }

    /// Execute an operation with retry logic
    ///
    /// # Errors
    /// Returns the last error if all attempts are exhausted, or the first
    /// non-retryable error
    pub async fn execute<F, Fut, T>(&self, operation: F) -> GatewayResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        self.execute_tracked(operation).await.into_result()
    }

    /// Execute an operation with retry logic and report every attempt
    pub async fn execute_tracked<F, Fut, T>(&self, operation: F) -> RetryResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut report = RetryReport::default();

        loop {
            report.attempts += 1;

            match operation().await {
                Ok(value) => {
                    if report.attempts > 1 {
                        debug!(attempts = report.attempts, "Retry succeeded");
                    }
                    return RetryResult::Success { value, report };
                }
                Err(error) => {
                    if !self.is_retryable(&error) {
                        return RetryResult::NonRetryable { error, report };
                    }
                    if report.attempts >= max_attempts {
                        warn!(
                            attempts = report.attempts,
                            error = %error,
                            "Retry attempts exhausted"
                        );
                        return RetryResult::Exhausted { error, report };
                    }

                    let delay = self.delay_for_attempt(report.attempts - 1);
                    warn!(
                        attempt = report.attempts,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying after error"
                    );

                    tokio::time::sleep(delay).await;
                    report.delays.push(delay);
                }
            }
        }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for retry policy
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    config: RetryConfig,
}

impl RetryPolicyBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt ceiling
    #[must_use]
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.config.max_attempts = n;
        self
    }

    /// Set base delay
    #[must_use]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.base_delay = delay;
        self
    }

    /// Set min delay
    #[must_use]
    pub fn min_delay(mut self, delay: Duration) -> Self {
        self.config.min_delay = delay;
        self
    }

    /// Set max delay
    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.config.max_delay = delay;
        self
    }

    /// Set backoff multiplier
    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.config.multiplier = multiplier;
        self
    }

    /// Set jitter factor
    #[must_use]
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.config.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Build the policy
    #[must_use]
    pub fn build(self) -> RetryPolicy {
        RetryPolicy::new(self.config)
    }
}
