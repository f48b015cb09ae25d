//! # Gateway Core
//!
//! Core types, traits, and error handling for the shortform generation gateway.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Conversation turns and generation parameters
//! - The backend trait every provider implements
//! - Error types and handling
//! - Validated domain types (newtypes)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod provider;
pub mod request;
pub mod types;

// Re-export commonly used types
pub use error::{excerpt, ErrorKind, GatewayError, GatewayResult, EXCERPT_LIMIT};
pub use provider::{ChatBackend, ProviderType};
pub use request::{
    ChatMessage, CompletionRequest, GenerationOverrides, GenerationParams, MessageRole,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};
pub use types::{MaxTokens, Temperature};
