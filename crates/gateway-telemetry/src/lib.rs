//! # Gateway Telemetry
//!
//! Structured logging setup for the shortform generation gateway.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
