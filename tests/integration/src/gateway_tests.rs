//! Gateway behaviour over HTTP
//!
//! Credential handling, retry accounting, empty-reply handling and the
//! request shape each provider receives.

use crate::fixtures::*;
use crate::mock_providers::*;
use gateway_client::{Gateway, GatewayOptions};
use gateway_config::{GatewayConfig, ProviderSettings};
use gateway_core::{ChatMessage, ErrorKind, GenerationOverrides, ProviderType};
use pretty_assertions::assert_eq;
use serde_json::json;

fn conversation() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You write ad copy."),
        ChatMessage::user("Pitch the earphones."),
        ChatMessage::assistant("Silence the commute."),
        ChatMessage::system("Answer in Korean."),
        ChatMessage::user("Shorter, please."),
    ]
}

/// A missing credential fails at construction, before any request
#[tokio::test]
async fn test_missing_key_makes_no_requests() {
    let mock = MockOpenAI::new().await;
    mock.mock_reply("unused").await;

    let config = GatewayConfig::for_provider(ProviderType::OpenAI).with_settings(
        ProviderType::OpenAI,
        ProviderSettings::default().with_base_url(mock.url()),
    );

    let err = Gateway::from_config(&config, GatewayOptions::default()).expect_err("no key");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("OPENAI_API_KEY"));
    assert!(mock.request_bodies().await.is_empty());
}

/// OpenAI receives merged system text followed by the full history
#[tokio::test]
async fn test_openai_request_shape() {
    let mock = MockOpenAI::new().await;
    mock.mock_reply("조용한 출근길").await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());

    let reply = gateway
        .send(&conversation(), GenerationOverrides::none())
        .await
        .expect("reply");
    assert_eq!(reply, "조용한 출근길");

    let bodies = mock.request_bodies().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 1200);
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "You write ad copy.\n\nAnswer in Korean."},
            {"role": "user", "content": "Pitch the earphones."},
            {"role": "assistant", "content": "Silence the commute."},
            {"role": "user", "content": "Shorter, please."}
        ])
    );
}

/// Gemini receives a system instruction and one flattened user turn
#[tokio::test]
async fn test_gemini_request_shape() {
    let mock = MockGemini::new(GEMINI_TEST_MODEL).await;
    mock.mock_reply("짧게 갑니다").await;
    let gateway = mock_gateway(ProviderType::Gemini, &mock.url());

    let reply = gateway
        .send(
            &conversation(),
            GenerationOverrides::none().max_output_tokens(256),
        )
        .await
        .expect("reply");
    assert_eq!(reply, "짧게 갑니다");

    let bodies = mock.request_bodies().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        "You write ad copy.\n\nAnswer in Korean."
    );
    assert_eq!(
        body["contents"],
        json!([{
            "role": "user",
            "parts": [{"text": "Pitch the earphones.\n\nSilence the commute.\n\nShorter, please."}]
        }])
    );
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
}

/// Transient failures are retried until the backend answers
#[tokio::test]
async fn test_transient_failures_then_success() {
    let mock = MockOpenAI::new().await;
    mock.mock_failures(503, 2).await;
    mock.mock_reply("third time lucky").await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());

    let reply = gateway
        .send(&[ChatMessage::user("hi")], GenerationOverrides::none())
        .await
        .expect("recovered");
    assert_eq!(reply, "third time lucky");
    assert_eq!(mock.request_bodies().await.len(), 3);
}

/// Rate limiting counts as transient too
#[tokio::test]
async fn test_rate_limit_is_retried() {
    let mock = MockOpenAI::new().await;
    mock.mock_failures(429, 1).await;
    mock.mock_reply("after the wait").await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());

    let reply = gateway
        .send(&[ChatMessage::user("hi")], GenerationOverrides::none())
        .await
        .expect("recovered");
    assert_eq!(reply, "after the wait");
    assert_eq!(mock.request_bodies().await.len(), 2);
}

/// Exactly five attempts are made before the last error surfaces
#[tokio::test]
async fn test_retries_exhausted_after_five_attempts() {
    let mock = MockOpenAI::new().await;
    mock.mock_always_failing(500, 5).await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());

    let err = gateway
        .send(&[ChatMessage::user("hi")], GenerationOverrides::none())
        .await
        .expect_err("exhausted");
    assert_eq!(err.kind(), ErrorKind::TransientCall);
    assert_eq!(err.status_code(), Some(500));
    mock.server.verify().await;
}

/// A filtered completion surfaces after one call
#[tokio::test]
async fn test_openai_filtered_reply_not_retried() {
    let mock = MockOpenAI::new().await;
    mock.mock_filtered(1).await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());

    let err = gateway
        .send(&[ChatMessage::user("hi")], GenerationOverrides::none())
        .await
        .expect_err("filtered");
    assert_eq!(err.kind(), ErrorKind::EmptyOrFilteredReply);
    mock.server.verify().await;
}

/// A blocked prompt surfaces after one call
#[tokio::test]
async fn test_gemini_blocked_prompt_not_retried() {
    let mock = MockGemini::new(GEMINI_TEST_MODEL).await;
    mock.mock_blocked(1).await;
    let gateway = mock_gateway(ProviderType::Gemini, &mock.url());

    let err = gateway
        .send(&[ChatMessage::user("hi")], GenerationOverrides::none())
        .await
        .expect_err("blocked");
    assert_eq!(err.kind(), ErrorKind::EmptyOrFilteredReply);
    assert!(err.to_string().contains("SAFETY"));
    mock.server.verify().await;
}

/// Overrides apply to one call and leave the defaults alone
#[tokio::test]
async fn test_overrides_are_per_call() {
    let mock = MockOpenAI::new().await;
    mock.mock_reply("ok").await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());
    let turns = [ChatMessage::user("hi")];

    gateway
        .send(&turns, GenerationOverrides::none().temperature(0.2))
        .await
        .expect("first");
    gateway
        .send(&turns, GenerationOverrides::none())
        .await
        .expect("second");

    let temperatures: Vec<f64> = mock
        .request_bodies()
        .await
        .iter()
        .filter_map(|body| body["temperature"].as_f64())
        .collect();
    assert_eq!(temperatures.len(), 2);
    assert!((temperatures[0] - 0.2).abs() < 1e-6);
    assert!((temperatures[1] - 0.7).abs() < 1e-6);
}

/// Invalid input is rejected without touching the network
#[tokio::test]
async fn test_invalid_input_makes_no_requests() {
    let mock = MockOpenAI::new().await;
    mock.mock_reply("unused").await;
    let gateway = mock_gateway(ProviderType::OpenAI, &mock.url());

    let err = gateway
        .send(&[], GenerationOverrides::none())
        .await
        .expect_err("empty");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = gateway
        .send(
            &[ChatMessage::user("hi")],
            GenerationOverrides::none().temperature(3.5),
        )
        .await
        .expect_err("too hot");
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(mock.request_bodies().await.is_empty());
}
