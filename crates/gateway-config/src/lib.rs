//! # Gateway Config
//!
//! Explicit configuration for the shortform generation gateway.
//!
//! Configuration is read once, by the composition root, and handed to the
//! gateway as a value:
//! - [`GatewayConfig::from_env`] reads `AI_PROVIDER`, `OPENAI_*`, `GEMINI_*`
//!   and `GATEWAY_*` variables
//! - [`GatewayConfig::load_file`] parses a TOML file and overlays the environment
//! - [`GatewayConfig::resolve`] narrows the configuration to one backend

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod loader;

pub use config::{
    default_base_url, default_post_call_delay, GatewayConfig, ProviderSettings, ResolvedBackend,
    RetrySettings, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT, GEMINI_POST_CALL_DELAY,
};
pub use loader::api_key_var;
