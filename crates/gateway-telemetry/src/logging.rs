//! Logging setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and either
//! human-readable or JSON output. `RUST_LOG` wins over the configured level.

use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include the event target
    pub with_target: bool,
    /// Write to stderr instead of stdout
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            with_target: false,
            to_stderr: true,
        }
    }
}

impl LoggingConfig {
    /// Configuration with the given default level
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Map a `-v` count to a level: 0 = warn, 1 = info, 2 = debug, 3+ = trace
    #[must_use]
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self::new(level).with_target(verbose >= 2)
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Include event targets
    #[must_use]
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Build the filter, preferring `RUST_LOG`
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Initialize logging with the given configuration
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.filter();

    let layer = match (config.format, config.to_stderr) {
        (LogFormat::Json, true) => fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .boxed(),
        (LogFormat::Json, false) => fmt::layer()
            .json()
            .with_target(config.with_target)
            .boxed(),
        (LogFormat::Pretty, true) => fmt::layer()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .boxed(),
        (LogFormat::Pretty, false) => fmt::layer().with_target(config.with_target).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to install the global subscriber
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}
