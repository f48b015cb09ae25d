//! Error types for the gateway.
//!
//! Every failure surfaced by the gateway, the providers, the normalizer and the
//! content builders is a [`GatewayError`]. Each variant maps onto one
//! [`ErrorKind`] so callers can react to the category without matching on
//! provider-specific detail.

use std::time::Duration;
use thiserror::Error;

/// Maximum number of characters of a raw reply carried in diagnostics.
pub const EXCERPT_LIMIT: usize = 200;

/// Result alias used throughout the workspace
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Unified gateway error
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Missing or invalid configuration (credential, provider name). Never retried.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the problem
        message: String,
    },

    /// Invalid request parameters, rejected before any network attempt.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the problem
        message: String,
        /// Offending field, when known
        field: Option<String>,
        /// Machine-readable code
        code: String,
    },

    /// Transport or backend failure reported by a provider.
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
        /// HTTP status code, if the failure came from an HTTP response
        status_code: Option<u16>,
    },

    /// Backend rejected the call because of rate limiting.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message
        message: String,
    },

    /// Credential rejected by the backend.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message
        message: String,
    },

    /// A single attempt exceeded its time budget.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// Elapsed budget
        duration: Duration,
    },

    /// The call succeeded at the transport level but produced no usable text.
    #[error("Provider '{provider}' returned no usable content: {reason}")]
    EmptyReply {
        /// Provider name
        provider: String,
        /// Why the reply was considered empty (e.g. finish reason, block reason)
        reason: String,
    },

    /// A reply could not be parsed as JSON.
    #[error("Failed to parse model reply as JSON: {message}; reply excerpt: {excerpt}")]
    MalformedReply {
        /// Parser message
        message: String,
        /// Bounded prefix of the raw reply
        excerpt: String,
    },

    /// A reply parsed but did not have the shape the caller expected.
    #[error("Unexpected reply shape: {message}")]
    ReplyShape {
        /// Description of the mismatch
        message: String,
    },

    /// Internal invariant failure
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

/// Coarse error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing credential or unknown provider; fatal
    Configuration,
    /// Network or backend failure; retried with backoff
    TransientCall,
    /// Backend returned nothing usable; surfaced immediately
    EmptyOrFilteredReply,
    /// Reply text could not be parsed as JSON
    MalformedStructuredReply,
    /// Caller supplied invalid input
    Validation,
    /// Parsed reply does not match the caller's schema
    ReplyShape,
}

impl GatewayError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(
        message: impl Into<String>,
        field: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field,
            code: code.into(),
        }
    }

    /// Create a provider error
    pub fn provider(
        provider: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            status_code,
        }
    }

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Create an empty-reply error
    pub fn empty_reply(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EmptyReply {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-reply error, keeping only a bounded excerpt of `raw`
    pub fn malformed_reply(message: impl Into<String>, raw: &str) -> Self {
        Self::MalformedReply {
            message: message.into(),
            excerpt: excerpt(raw),
        }
    }

    /// Create a reply-shape error
    pub fn reply_shape(message: impl Into<String>) -> Self {
        Self::ReplyShape {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::EmptyReply { .. } => ErrorKind::EmptyOrFilteredReply,
            Self::MalformedReply { .. } => ErrorKind::MalformedStructuredReply,
            Self::ReplyShape { .. } => ErrorKind::ReplyShape,
            Self::Provider { .. }
            | Self::RateLimit { .. }
            | Self::Authentication { .. }
            | Self::Timeout { .. }
            | Self::Internal { .. } => ErrorKind::TransientCall,
        }
    }

    /// Whether the gateway retries this error.
    ///
    /// Every transport or backend failure is retried regardless of subtype.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::TransientCall
    }

    /// HTTP status code attached to the error, if any
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status_code, .. } => *status_code,
            Self::RateLimit { .. } => Some(429),
            Self::Authentication { .. } => Some(401),
            _ => None,
        }
    }
}

/// Bounded, char-safe prefix of `raw` for diagnostics
#[must_use]
pub fn excerpt(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(EXCERPT_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
