//! Configuration and request fixtures for integration tests

use crate::mock_providers::TEST_API_KEY;
use gateway_client::{Gateway, GatewayOptions};
use gateway_config::{GatewayConfig, ProviderSettings, RetrySettings};
use gateway_core::ProviderType;
use once_cell::sync::Lazy;
use shortform_content::{KeywordRequest, ScriptRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Gemini model the mocks serve
pub const GEMINI_TEST_MODEL: &str = "gemini-1.5-flash";

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests (set `TEST_LOG` to see output)
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Default attempt budget with millisecond backoff
pub fn fast_retry() -> RetrySettings {
    RetrySettings {
        base_delay: Duration::from_millis(10),
        min_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(40),
        ..RetrySettings::default()
    }
}

/// Configuration pointing `provider` at a mock server
pub fn mock_config(provider: ProviderType, base_url: &str) -> GatewayConfig {
    let mut settings = ProviderSettings::default()
        .with_api_key(TEST_API_KEY)
        .with_base_url(base_url)
        .with_post_call_delay(Duration::ZERO);
    if provider == ProviderType::Gemini {
        settings = settings.with_model(GEMINI_TEST_MODEL);
    }

    GatewayConfig::for_provider(provider)
        .with_settings(provider, settings)
        .with_request_timeout(Duration::from_secs(5))
        .with_retry(fast_retry())
}

/// Gateway built from [`mock_config`]
pub fn mock_gateway(provider: ProviderType, base_url: &str) -> Arc<Gateway> {
    init_tracing();
    Arc::new(
        Gateway::from_config(&mock_config(provider, base_url), GatewayOptions::default())
            .expect("mock config is complete"),
    )
}

/// Script request for a typical product
pub fn earphone_script_request() -> ScriptRequest {
    ScriptRequest {
        product_name: "무선 이어폰".to_string(),
        target_audience: "20대 직장인".to_string(),
        tone: "경쾌한".to_string(),
        language: "ko".to_string(),
        style: "리뷰".to_string(),
        brand_voice: Some("친근한 언니".to_string()),
    }
}

/// Keyword request for a typical product
pub fn earphone_keyword_request() -> KeywordRequest {
    KeywordRequest::new("무선 이어폰", "20대 직장인", "경쾌한", "리뷰")
}

/// Script reply as a model tends to send it: prose around a fenced object
pub const SCRIPT_REPLY: &str = "대본입니다!\n```json\n{\n  \"hook\": \"이거 하나면 출근길 끝\",\n  \"script\": \"소음은 끄고 음악은 켜세요.\",\n  \"cta\": \"링크에서 지금 확인하세요\",\n  \"talking_points\": [\"노이즈 캔슬링\", \"30시간 배터리\"],\n  \"description\": \"출근길 필수템\",\n  \"duration_seconds\": 35\n}\n```\n마음에 드셨으면 좋겠어요.";

/// Thumbnail reply in the object shape
pub const THUMBNAIL_REPLY: &str = r#"{"options": ["출근길 필수템", "소음 제로", "30시간 재생"]}"#;

/// Keyword reply
pub const KEYWORD_REPLY: &str = r#"{"korean_keywords": ["무선 이어폰", "노캔 이어폰"], "chinese_keywords": ["无线耳机", "降噪耳机"], "douyin_search_queries": ["无线耳机推荐", "降噪耳机测评"]}"#;
