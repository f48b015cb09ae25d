//! OpenAI chat-completions backend.
//!
//! - Endpoint: `POST {base}/v1/chat/completions`
//! - Authentication: bearer token
//! - System instruction is sent as a leading `system` message, followed by
//!   the full user/assistant history in order

use async_trait::async_trait;
use gateway_core::{
    ChatBackend, CompletionRequest, GatewayError, GatewayResult, MessageRole, ProviderType,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, trace};

const PROVIDER: &str = "openai";

/// OpenAI backend configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key
    pub api_key: SecretString,
    /// Model identifier
    pub model: String,
    /// API base URL (no trailing slash)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Configuration with the default model, base URL and timeout
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            model: ProviderType::OpenAI.default_model().to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI chat-completions backend
pub struct OpenAIBackend {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIBackend {
    /// Create a new backend
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: OpenAIConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn transform_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len());

        if let Some(instruction) = request.system_instruction() {
            messages.push(OpenAIMessage {
                role: MessageRole::System.as_str(),
                content: instruction,
            });
        }

        messages.extend(request.exchange().map(|m| OpenAIMessage {
            role: m.role.as_str(),
            content: m.content.clone(),
        }));

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.params.temperature.value(),
            max_tokens: request.params.max_output_tokens.value(),
        }
    }

    fn extract_text(response: OpenAIResponse) -> GatewayResult<String> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::empty_reply(PROVIDER, "no choices in response"))?;

        let finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown");
        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ if finish_reason == "content_filter" => Err(GatewayError::empty_reply(
                PROVIDER,
                "reply withheld by content filter",
            )),
            _ => Err(GatewayError::empty_reply(
                PROVIDER,
                format!("empty message content (finish_reason: {finish_reason})"),
            )),
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::timeout(self.config.timeout)
        } else {
            GatewayError::provider(PROVIDER, format!("Request failed: {e}"), None)
        }
    }

    /// Map an HTTP error response
    fn parse_error(status: u16, body: &str) -> GatewayError {
        if let Ok(error) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let message = error.error.message;
            let code = error.error.code.unwrap_or_else(|| "unknown".to_string());
            return match status {
                401 | 403 => GatewayError::authentication(message),
                429 => GatewayError::rate_limit(message),
                500..=599 => GatewayError::provider(PROVIDER, message, Some(status)),
                _ => GatewayError::provider(PROVIDER, format!("{code}: {message}"), Some(status)),
            };
        }

        let message = format!("HTTP {status}: {}", gateway_core::excerpt(body));
        match status {
            429 => GatewayError::rate_limit(message),
            _ => GatewayError::provider(PROVIDER, message, Some(status)),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAI
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> GatewayResult<String> {
        let url = self.completions_url();
        let body = self.transform_request(request);

        debug!(
            provider = PROVIDER,
            model = %self.config.model,
            messages = body.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "OpenAI request failed");
                self.transport_error(&e)
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        trace!(status = %status, body = %text, "Received OpenAI response");

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &text));
        }

        let parsed: OpenAIResponse = serde_json::from_str(&text).map_err(|e| {
            GatewayError::provider(PROVIDER, format!("Invalid response JSON: {e}"), None)
        })?;

        Self::extract_text(parsed)
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}
