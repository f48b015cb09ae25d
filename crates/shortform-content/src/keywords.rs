//! Keyword translation for Douyin product research.

use crate::payload::string_list;
use crate::prompts::{render, KEYWORD_SYSTEM_PROMPT, KEYWORD_TEMPLATE};
use gateway_client::Gateway;
use gateway_core::{ChatMessage, GatewayError, GatewayResult, GenerationOverrides};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Keyword replies are sampled cooler than creative copy
pub const KEYWORD_TEMPERATURE: f32 = 0.4;

fn default_language() -> String {
    "ko".to_string()
}

/// Product to build search keywords for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRequest {
    /// Product name
    pub product_name: String,
    /// Intended viewers
    pub target_audience: String,
    /// Tone of voice
    pub tone: String,
    /// Video style
    pub style: String,
    /// Source language
    #[serde(default = "default_language")]
    pub language: String,
}

impl KeywordRequest {
    /// Request with the default source language (`ko`)
    #[must_use]
    pub fn new(
        product_name: impl Into<String>,
        target_audience: impl Into<String>,
        tone: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            target_audience: target_audience.into(),
            tone: tone.into(),
            style: style.into(),
            language: default_language(),
        }
    }
}

/// Korean and Chinese keywords plus ready-made Douyin queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBundle {
    /// Korean search keywords
    pub korean_keywords: Vec<String>,
    /// Simplified Chinese search keywords
    pub chinese_keywords: Vec<String>,
    /// Suggested Douyin search queries
    pub douyin_search_queries: Vec<String>,
    /// Reply object as parsed
    pub raw_payload: Value,
}

/// Translates products into keyword sets through a [`Gateway`]
#[derive(Debug, Clone)]
pub struct KeywordTranslator {
    gateway: Arc<Gateway>,
}

impl KeywordTranslator {
    /// Create a translator using `gateway`
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Build the keyword bundle for `request`
    ///
    /// # Errors
    /// Gateway errors pass through; a non-object reply is [`GatewayError::ReplyShape`]
    pub async fn translate(&self, request: &KeywordRequest) -> GatewayResult<KeywordBundle> {
        let prompt = render(
            KEYWORD_TEMPLATE,
            &[
                ("product_name", request.product_name.as_str()),
                ("target_audience", request.target_audience.as_str()),
                ("tone", request.tone.as_str()),
                ("style", request.style.as_str()),
            ],
        );

        let reply = self
            .gateway
            .send(
                &[
                    ChatMessage::system(KEYWORD_SYSTEM_PROMPT),
                    ChatMessage::user(prompt),
                ],
                GenerationOverrides::none().temperature(KEYWORD_TEMPERATURE),
            )
            .await?;

        let payload = gateway_normalizer::extract(&reply)?;
        let Value::Object(map) = &payload else {
            return Err(GatewayError::reply_shape(format!(
                "keyword reply must be a JSON object, got {}",
                gateway_normalizer::value_type(&payload)
            )));
        };

        let bundle = KeywordBundle {
            korean_keywords: string_list(map, "korean_keywords"),
            chinese_keywords: string_list(map, "chinese_keywords"),
            douyin_search_queries: string_list(map, "douyin_search_queries"),
            raw_payload: payload.clone(),
        };

        info!(
            product = %request.product_name,
            korean = bundle.korean_keywords.len(),
            chinese = bundle.chinese_keywords.len(),
            queries = bundle.douyin_search_queries.len(),
            "Keywords translated"
        );

        Ok(bundle)
    }
}
