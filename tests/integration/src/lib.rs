//! Integration tests for the Shortform Studio generation gateway
//!
//! Every test drives a real [`gateway_client::Gateway`] over HTTP against
//! wiremock servers standing in for OpenAI and Gemini.

pub mod fixtures;
pub mod mock_providers;

pub use fixtures::*;
pub use mock_providers::*;

#[cfg(test)]
mod content_tests;
#[cfg(test)]
mod gateway_tests;
