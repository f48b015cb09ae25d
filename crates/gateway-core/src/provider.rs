//! Backend abstraction.
//!
//! A [`ChatBackend`] turns a [`CompletionRequest`] into the text of a single
//! reply. Each provider wire protocol has one implementation; the gateway is
//! bound to exactly one of them for its lifetime.

use crate::error::{GatewayError, GatewayResult};
use crate::request::CompletionRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported provider types
///
/// Deserializes through [`FromStr`], so config files accept the same
/// case-insensitive names as the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProviderType {
    /// OpenAI chat completions (native system role, multi-turn history)
    #[default]
    OpenAI,
    /// Google Gemini generateContent (system instruction, flattened prompt)
    Gemini,
}

impl ProviderType {
    /// Canonical lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Default model identifier for this provider
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4o-mini",
            Self::Gemini => "gemini-1.5-flash",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" | "google" => Ok(Self::Gemini),
            other => Err(GatewayError::configuration(format!(
                "unsupported provider '{other}' (expected 'openai' or 'gemini')"
            ))),
        }
    }
}

impl TryFrom<String> for ProviderType {
    type Error = GatewayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One generative backend bound to a model and credential
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Provider type of this backend
    fn provider_type(&self) -> ProviderType;

    /// Model identifier the backend is bound to
    fn model(&self) -> &str;

    /// Send the conversation and return the reply text.
    ///
    /// Implementations return [`GatewayError::EmptyReply`] rather than an empty string.
    async fn complete(&self, request: &CompletionRequest) -> GatewayResult<String>;
}
