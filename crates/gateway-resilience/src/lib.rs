//! # Gateway Resilience
//!
//! Resilience patterns for the generation gateway:
//! - Retry policy with exponential backoff
//! - Fixed post-call throttle for rate-limited backends

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod retry;
pub mod throttle;

// Re-export main types
pub use retry::{RetryConfig, RetryPolicy, RetryPolicyBuilder, RetryReport, RetryResult};
pub use throttle::Throttle;
