//! Content builders end to end
//!
//! Script bundles and keyword bundles generated through a mocked provider,
//! from prompt rendering down to the parsed result.

use crate::fixtures::*;
use crate::mock_providers::*;
use gateway_core::{ErrorKind, ProviderType};
use pretty_assertions::assert_eq;
use shortform_content::{slugify, KeywordTranslator, ScriptService};

#[tokio::test]
async fn test_script_bundle_over_gemini() {
    let mock = MockGemini::new(GEMINI_TEST_MODEL).await;
    mock.mock_replies(&[SCRIPT_REPLY, THUMBNAIL_REPLY]).await;
    let service = ScriptService::new(mock_gateway(ProviderType::Gemini, &mock.url()));

    let bundle = service
        .generate_bundle(&earphone_script_request())
        .await
        .expect("bundle");

    assert_eq!(bundle.hook, "이거 하나면 출근길 끝");
    assert_eq!(bundle.script, "소음은 끄고 음악은 켜세요.");
    assert_eq!(bundle.cta, "링크에서 지금 확인하세요");
    assert_eq!(bundle.talking_points, vec!["노이즈 캔슬링", "30시간 배터리"]);
    assert_eq!(bundle.description, "출근길 필수템");
    assert_eq!(bundle.duration_seconds, 35);
    assert_eq!(
        bundle.thumbnail_options,
        vec!["출근길 필수템", "소음 제로", "30시간 재생"]
    );

    let bodies = mock.request_bodies().await;
    assert_eq!(bodies.len(), 2);

    let script_prompt = bodies[0]["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    assert!(script_prompt.contains("무선 이어폰"));
    assert!(script_prompt.contains("친근한 언니"));
    assert!(bodies[0]["systemInstruction"].is_object());

    let thumbnail_prompt = bodies[1]["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    assert!(thumbnail_prompt.contains("이거 하나면 출근길 끝"));
    let temperature = bodies[1]["generationConfig"]["temperature"]
        .as_f64()
        .unwrap_or_default();
    assert!((temperature - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn test_script_prose_reply_is_malformed() {
    let mock = MockOpenAI::new().await;
    mock.mock_reply("죄송하지만 지금은 대본을 쓸 수 없어요.").await;
    let service = ScriptService::new(mock_gateway(ProviderType::OpenAI, &mock.url()));

    let err = service
        .generate_bundle(&earphone_script_request())
        .await
        .expect_err("prose");
    assert_eq!(err.kind(), ErrorKind::MalformedStructuredReply);
    assert!(err.to_string().contains("죄송하지만"));
    assert_eq!(mock.request_bodies().await.len(), 1);
}

#[tokio::test]
async fn test_keyword_bundle_over_openai() {
    let mock = MockOpenAI::new().await;
    mock.mock_reply(KEYWORD_REPLY).await;
    let translator = KeywordTranslator::new(mock_gateway(ProviderType::OpenAI, &mock.url()));

    let bundle = translator
        .translate(&earphone_keyword_request())
        .await
        .expect("bundle");
    assert_eq!(bundle.korean_keywords, vec!["무선 이어폰", "노캔 이어폰"]);
    assert_eq!(bundle.chinese_keywords, vec!["无线耳机", "降噪耳机"]);
    assert_eq!(bundle.douyin_search_queries, vec!["无线耳机推荐", "降噪耳机测评"]);

    let bodies = mock.request_bodies().await;
    let temperature = bodies[0]["temperature"].as_f64().unwrap_or_default();
    assert!((temperature - 0.4).abs() < 1e-6);
    assert_eq!(bodies[0]["messages"][0]["role"], "system");
}

#[test]
fn test_slug_for_output_files() {
    assert_eq!(slugify("무선 이어폰 (블랙)"), "무선_이어폰_블랙");
}
