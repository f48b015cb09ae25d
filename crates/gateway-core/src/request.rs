//! Request types for the gateway.
//!
//! A conversation is an ordered list of role-tagged [`ChatMessage`]s. The
//! [`CompletionRequest`] pairs it with resolved [`GenerationParams`] and is
//! what every backend receives.

use crate::error::{GatewayError, GatewayResult};
use crate::types::{MaxTokens, Temperature};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output length limit
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1200;

/// Chat message with role and content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: MessageRole,

    /// Text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an explicit role
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl MessageRole {
    /// Wire name of the role
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(GatewayError::validation(
                format!("unknown message role '{other}'"),
                Some("role".to_string()),
                "invalid_role",
            )),
        }
    }
}

/// Resolved generation parameters for one call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: Temperature,
    /// Output length limit
    pub max_output_tokens: MaxTokens,
}

impl GenerationParams {
    /// Create validated parameters
    ///
    /// # Errors
    /// Returns a validation error if either value is out of range
    pub fn new(temperature: f32, max_output_tokens: u32) -> GatewayResult<Self> {
        Ok(Self {
            temperature: Temperature::new(temperature)?,
            max_output_tokens: MaxTokens::new(max_output_tokens)?,
        })
    }

    /// Apply per-call overrides on top of these defaults
    ///
    /// # Errors
    /// Returns a validation error if an override is out of range
    pub fn with_overrides(self, overrides: &GenerationOverrides) -> GatewayResult<Self> {
        Ok(Self {
            temperature: overrides
                .temperature
                .map(Temperature::new)
                .transpose()?
                .unwrap_or(self.temperature),
            max_output_tokens: overrides
                .max_output_tokens
                .map(MaxTokens::new)
                .transpose()?
                .unwrap_or(self.max_output_tokens),
        })
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: Temperature(DEFAULT_TEMPERATURE),
            max_output_tokens: MaxTokens(DEFAULT_MAX_OUTPUT_TOKENS),
        }
    }
}

/// Optional per-call parameter overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOverrides {
    /// Temperature for this call only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output length limit for this call only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationOverrides {
    /// No overrides
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Override the temperature
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the output length limit
    #[must_use]
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// A conversation plus resolved parameters, as handed to a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Ordered conversation turns
    pub messages: Vec<ChatMessage>,
    /// Generation parameters
    pub params: GenerationParams,
}

impl CompletionRequest {
    /// Create a validated request
    ///
    /// # Errors
    /// Returns a validation error if `messages` is empty or holds only
    /// system turns
    pub fn new(messages: Vec<ChatMessage>, params: GenerationParams) -> GatewayResult<Self> {
        if messages.is_empty() {
            return Err(GatewayError::validation(
                "messages cannot be empty",
                Some("messages".to_string()),
                "empty_messages",
            ));
        }
        if messages.iter().all(|m| m.role == MessageRole::System) {
            return Err(GatewayError::validation(
                "messages need at least one user or assistant turn",
                Some("messages".to_string()),
                "no_exchange_turns",
            ));
        }
        Ok(Self { messages, params })
    }

    /// Effective system instruction.
    ///
    /// Several system turns are joined with a blank line; `None` when there are none.
    #[must_use]
    pub fn system_instruction(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// User and assistant turns, in order
    pub fn exchange(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
    }

    /// User and assistant turn contents joined into one prompt text.
    ///
    /// Role alternation is not preserved.
    #[must_use]
    pub fn flattened_prompt(&self) -> String {
        self.exchange()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
