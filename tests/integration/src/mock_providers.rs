//! Mock LLM providers for integration testing
//!
//! Wiremock servers that answer like the OpenAI chat completions API and
//! the Gemini `generateContent` API.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Key the mocks expect; anything else gets a 401
pub const TEST_API_KEY: &str = "test-key";

/// Mock OpenAI API server
pub struct MockOpenAI {
    pub server: MockServer,
}

impl MockOpenAI {
    /// Create a new mock OpenAI server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    fn completions() -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", format!("Bearer {TEST_API_KEY}").as_str()))
    }

    /// Answer every call with `content`
    pub async fn mock_reply(&self, content: &str) {
        Self::completions()
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_chat_response(content)))
            .mount(&self.server)
            .await;
    }

    /// Answer the next `times` calls with `status`, then fall through
    pub async fn mock_failures(&self, status: u16, times: u64) {
        Self::completions()
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(openai_error_response("server_error", "Upstream failure")),
            )
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Fail every call with `status`, expecting exactly `expected` calls
    pub async fn mock_always_failing(&self, status: u16, expected: u64) {
        Self::completions()
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(openai_error_response("server_error", "Upstream failure")),
            )
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Reply with a content-filtered completion, expecting exactly `expected` calls
    pub async fn mock_filtered(&self, expected: u64) {
        Self::completions()
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-filtered",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": null},
                    "finish_reason": "content_filter"
                }]
            })))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request received so far
    pub async fn request_bodies(&self) -> Vec<Value> {
        request_bodies(&self.server).await
    }
}

/// Mock Gemini API server
pub struct MockGemini {
    pub server: MockServer,
    model: String,
}

impl MockGemini {
    /// Create a new mock Gemini server serving `model`
    pub async fn new(model: &str) -> Self {
        Self {
            server: MockServer::start().await,
            model: model.to_string(),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    fn generate(&self) -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", self.model)))
            .and(header("x-goog-api-key", TEST_API_KEY))
    }

    /// Answer every call with `text`
    pub async fn mock_reply(&self, text: &str) {
        self.generate()
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response(text)))
            .mount(&self.server)
            .await;
    }

    /// Answer calls with `texts` in order, one each
    pub async fn mock_replies(&self, texts: &[&str]) {
        for (i, text) in texts.iter().enumerate() {
            self.generate()
                .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response(text)))
                .up_to_n_times(1)
                .with_priority(u8::try_from(i + 1).unwrap_or(u8::MAX))
                .mount(&self.server)
                .await;
        }
    }

    /// Reply with a prompt blocked by safety filters, expecting exactly `expected` calls
    pub async fn mock_blocked(&self, expected: u64) {
        self.generate()
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request received so far
    pub async fn request_bodies(&self) -> Vec<Value> {
        request_bodies(&self.server).await
    }
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| serde_json::from_slice(&request.body).ok())
        .collect()
}

/// OpenAI chat completion body carrying `content`
pub fn openai_chat_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    })
}

/// OpenAI error body
pub fn openai_error_response(code: &str, message: &str) -> Value {
    json!({
        "error": {"message": message, "type": "api_error", "code": code}
    })
}

/// Gemini `generateContent` body carrying `text`
pub fn gemini_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20}
    })
}
