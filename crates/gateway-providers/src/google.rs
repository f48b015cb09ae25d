//! Google Gemini backend (Google AI Studio `generateContent`).
//!
//! Gemini has no multi-turn history here: system turns become the
//! `systemInstruction`, and every user/assistant turn is flattened into a
//! single user content whose text is the turns joined by a blank line.

use async_trait::async_trait;
use gateway_core::{ChatBackend, CompletionRequest, GatewayError, GatewayResult, ProviderType};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, trace};

const PROVIDER: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini backend configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// API key (Google AI Studio)
    pub api_key: SecretString,
    /// Model identifier
    pub model: String,
    /// API base URL (no trailing slash)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl GoogleConfig {
    /// Create a new Google AI Studio configuration
    #[must_use]
    pub fn google_ai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            model: ProviderType::Gemini.default_model().to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
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

/// Gemini `generateContent` backend
pub struct GoogleBackend {
    config: GoogleConfig,
    client: Client,
}

impl GoogleBackend {
    /// Create a new backend
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: GoogleConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn transform_request(request: &CompletionRequest) -> GoogleRequest {
        let system_instruction = request.system_instruction().map(|text| GoogleContent {
            role: None,
            parts: vec![GooglePart { text }],
        });

        GoogleRequest {
            contents: vec![GoogleContent {
                role: Some("user".to_string()),
                parts: vec![GooglePart {
                    text: request.flattened_prompt(),
                }],
            }],
            system_instruction,
            generation_config: GoogleGenerationConfig {
                temperature: request.params.temperature.value(),
                max_output_tokens: request.params.max_output_tokens.value(),
            },
        }
    }

    fn extract_text(response: GoogleResponse) -> GatewayResult<String> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(GatewayError::empty_reply(
                PROVIDER,
                format!("prompt blocked ({reason})"),
            ));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::empty_reply(PROVIDER, "no candidates in response"))?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        let reason = match candidate.finish_reason.as_deref() {
            Some("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT") => {
                format!(
                    "candidate blocked ({})",
                    candidate.finish_reason.as_deref().unwrap_or_default()
                )
            }
            Some(other) => format!("empty candidate (finish_reason: {other})"),
            None => "empty candidate".to_string(),
        };
        Err(GatewayError::empty_reply(PROVIDER, reason))
    }

    fn transport_error(&self, e: &reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::timeout(self.config.timeout)
        } else {
            GatewayError::provider(PROVIDER, format!("Request failed: {e}"), None)
        }
    }

    /// Parse error response
    fn parse_error(status: u16, body: &str) -> GatewayError {
        #[derive(Deserialize)]
        struct GoogleErrorResponse {
            error: GoogleErrorDetail,
        }

        #[derive(Deserialize)]
        struct GoogleErrorDetail {
            message: String,
        }

        if let Ok(error_response) = serde_json::from_str::<GoogleErrorResponse>(body) {
            let message = error_response.error.message;
            match status {
                401 | 403 => GatewayError::authentication(message),
                429 => GatewayError::rate_limit(message),
                _ => GatewayError::provider(PROVIDER, message, Some(status)),
            }
        } else {
            let message = format!("HTTP {status}: {}", gateway_core::excerpt(body));
            match status {
                429 => GatewayError::rate_limit(message),
                _ => GatewayError::provider(PROVIDER, message, Some(status)),
            }
        }
    }
}

#[async_trait]
impl ChatBackend for GoogleBackend {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Gemini
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> GatewayResult<String> {
        let url = self.endpoint_url();
        let google_request = Self::transform_request(request);

        debug!(
            provider = PROVIDER,
            model = %self.config.model,
            has_system_instruction = google_request.system_instruction.is_some(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&google_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                self.transport_error(&e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        trace!(status = %status, body = %body, "Received Gemini response");

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &body));
        }

        let google_response: GoogleResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::provider(PROVIDER, format!("Invalid response JSON: {e}"), None)
        })?;

        Self::extract_text(google_response)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest {
    contents: Vec<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GoogleContent>,
    generation_config: GoogleGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoogleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GooglePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GooglePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GooglePromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleCandidate {
    #[serde(default)]
    content: Option<GoogleContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GooglePromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
