//! Script bundle generation.
//!
//! One bundle takes two gateway calls: the script itself, then thumbnail
//! captions built from the script's hook.

use crate::payload::{display_string, required_str, string_list};
use crate::prompts::{
    render, NO_BRAND_VOICE, SCRIPT_SYSTEM_PROMPT, SCRIPT_TEMPLATE, THUMBNAIL_SYSTEM_PROMPT,
    THUMBNAIL_TEMPLATE,
};
use gateway_client::Gateway;
use gateway_core::{ChatMessage, GatewayError, GatewayResult, GenerationOverrides};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Thumbnail captions are sampled hotter than the script
pub const THUMBNAIL_TEMPERATURE: f32 = 0.8;

/// Used when the reply has no usable `duration_seconds`
pub const DEFAULT_DURATION_SECONDS: u32 = 30;

/// What to write a script for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Product name
    pub product_name: String,
    /// Intended viewers
    pub target_audience: String,
    /// Tone of voice
    pub tone: String,
    /// Output language
    pub language: String,
    /// Video style
    pub style: String,
    /// Brand voice, if the brand has one
    #[serde(default)]
    pub brand_voice: Option<String>,
}

/// Script, captions and metadata for one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptBundle {
    /// Full narration
    pub script: String,
    /// Opening line
    pub hook: String,
    /// Call to action
    pub cta: String,
    /// Key selling points
    pub talking_points: Vec<String>,
    /// Description box copy
    pub description: String,
    /// Target length
    pub duration_seconds: u32,
    /// Thumbnail caption candidates
    pub thumbnail_options: Vec<String>,
    /// Script reply as parsed, including fields not mapped above
    pub raw_script_payload: Value,
}

/// Script fields before thumbnails are generated
#[derive(Debug, Clone, PartialEq)]
struct ScriptDraft {
    script: String,
    hook: String,
    cta: String,
    talking_points: Vec<String>,
    description: String,
    duration_seconds: u32,
    raw: Value,
}

/// Generates [`ScriptBundle`]s through a [`Gateway`]
#[derive(Debug, Clone)]
pub struct ScriptService {
    gateway: Arc<Gateway>,
}

impl ScriptService {
    /// Create a service using `gateway`
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Generate the script, then thumbnail captions for its hook.
    ///
    /// # Errors
    /// Gateway errors pass through. A reply that is not JSON is
    /// [`GatewayError::MalformedReply`]; JSON of the wrong shape is
    /// [`GatewayError::ReplyShape`].
    pub async fn generate_bundle(&self, request: &ScriptRequest) -> GatewayResult<ScriptBundle> {
        let draft = self.generate_script(request).await?;
        let thumbnail_options = self.generate_thumbnail_options(request, &draft.hook).await?;

        info!(
            product = %request.product_name,
            talking_points = draft.talking_points.len(),
            thumbnails = thumbnail_options.len(),
            "Script bundle generated"
        );

        Ok(ScriptBundle {
            script: draft.script,
            hook: draft.hook,
            cta: draft.cta,
            talking_points: draft.talking_points,
            description: draft.description,
            duration_seconds: draft.duration_seconds,
            thumbnail_options,
            raw_script_payload: draft.raw,
        })
    }

    async fn generate_script(&self, request: &ScriptRequest) -> GatewayResult<ScriptDraft> {
        let prompt = render(
            SCRIPT_TEMPLATE,
            &[
                ("product_name", request.product_name.as_str()),
                ("target_audience", request.target_audience.as_str()),
                ("tone", request.tone.as_str()),
                ("style", request.style.as_str()),
                ("language", request.language.as_str()),
                (
                    "brand_voice",
                    request
                        .brand_voice
                        .as_deref()
                        .filter(|v| !v.trim().is_empty())
                        .unwrap_or(NO_BRAND_VOICE),
                ),
            ],
        );

        let reply = self
            .gateway
            .send(
                &[
                    ChatMessage::system(SCRIPT_SYSTEM_PROMPT),
                    ChatMessage::user(prompt),
                ],
                GenerationOverrides::none(),
            )
            .await?;

        let payload = gateway_normalizer::extract_object(&reply)?;
        debug!(fields = payload.len(), "Parsed script payload");
        parse_script(payload)
    }

    async fn generate_thumbnail_options(
        &self,
        request: &ScriptRequest,
        hook: &str,
    ) -> GatewayResult<Vec<String>> {
        let prompt = render(
            THUMBNAIL_TEMPLATE,
            &[
                ("product_name", request.product_name.as_str()),
                ("target_audience", request.target_audience.as_str()),
                ("tone", request.tone.as_str()),
                ("style", request.style.as_str()),
                ("hook", hook),
            ],
        );

        let reply = self
            .gateway
            .send(
                &[
                    ChatMessage::system(THUMBNAIL_SYSTEM_PROMPT),
                    ChatMessage::user(prompt),
                ],
                GenerationOverrides::none().temperature(THUMBNAIL_TEMPERATURE),
            )
            .await?;

        parse_thumbnail_options(gateway_normalizer::extract(&reply)?)
    }
}

fn parse_script(payload: Map<String, Value>) -> GatewayResult<ScriptDraft> {
    let duration_seconds = match payload.get("duration_seconds") {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_DURATION_SECONDS),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_DURATION_SECONDS),
        _ => DEFAULT_DURATION_SECONDS,
    };

    let description = payload
        .get("description")
        .filter(|v| !v.is_null())
        .map(display_string)
        .unwrap_or_default();

    Ok(ScriptDraft {
        script: required_str(&payload, "script")?,
        hook: required_str(&payload, "hook")?,
        cta: required_str(&payload, "cta")?,
        talking_points: string_list(&payload, "talking_points"),
        description,
        duration_seconds,
        raw: Value::Object(payload),
    })
}

/// Accepts a bare array, or an object carrying an `options` array
fn parse_thumbnail_options(value: Value) -> GatewayResult<Vec<String>> {
    match value {
        Value::Array(items) => Ok(items.iter().map(display_string).collect()),
        Value::Object(map) => match map.get("options") {
            Some(Value::Array(items)) => Ok(items.iter().map(display_string).collect()),
            Some(other) => Err(GatewayError::reply_shape(format!(
                "thumbnail 'options' must be an array, got {}",
                gateway_normalizer::value_type(other)
            ))),
            None => Err(GatewayError::reply_shape(
                "thumbnail reply object has no 'options' array",
            )),
        },
        other => Err(GatewayError::reply_shape(format!(
            "thumbnail reply must be an array or an object with 'options', got {}",
            gateway_normalizer::value_type(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{gateway, CannedBackend};
    use gateway_core::{ErrorKind, MessageRole};
    use serde_json::json;

    fn request() -> ScriptRequest {
        ScriptRequest {
            product_name: "무선 이어폰".to_string(),
            target_audience: "20대 직장인".to_string(),
            tone: "경쾌한".to_string(),
            language: "ko".to_string(),
            style: "리뷰".to_string(),
            brand_voice: None,
        }
    }

    const SCRIPT_REPLY: &str = "```json\n{\"script\": \"출근길 필수템!\", \"hook\": \"이거 하나면 끝\", \"cta\": \"지금 구매하세요\", \"talking_points\": [\"노이즈 캔슬링\", \"30시간 배터리\"], \"extra\": 1}\n```";

    #[tokio::test]
    async fn test_generate_bundle() {
        let backend = CannedBackend::new(&[SCRIPT_REPLY, r#"["끝판왕 이어폰", "출근길 필수"]"#]);
        let service = ScriptService::new(gateway(&backend));

        let bundle = service.generate_bundle(&request()).await.expect("bundle");
        assert_eq!(bundle.script, "출근길 필수템!");
        assert_eq!(bundle.hook, "이거 하나면 끝");
        assert_eq!(bundle.cta, "지금 구매하세요");
        assert_eq!(bundle.talking_points, vec!["노이즈 캔슬링", "30시간 배터리"]);
        assert_eq!(bundle.description, "");
        assert_eq!(bundle.duration_seconds, 30);
        assert_eq!(bundle.thumbnail_options, vec!["끝판왕 이어폰", "출근길 필수"]);
        assert_eq!(bundle.raw_script_payload["extra"], json!(1));

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);

        let script_call = &requests[0];
        assert_eq!(script_call.messages[0].role, MessageRole::System);
        assert_eq!(script_call.messages[0].content, SCRIPT_SYSTEM_PROMPT);
        assert!(script_call.messages[1].content.contains(NO_BRAND_VOICE));
        assert!((script_call.params.temperature.value() - 0.7).abs() < f32::EPSILON);

        let thumbnail_call = &requests[1];
        assert!(thumbnail_call.messages[1].content.contains("이거 하나면 끝"));
        assert!((thumbnail_call.params.temperature.value() - 0.8).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_brand_voice_is_rendered() {
        let backend = CannedBackend::new(&[SCRIPT_REPLY, r#"{"options": ["A"]}"#]);
        let service = ScriptService::new(gateway(&backend));

        let mut req = request();
        req.brand_voice = Some("친근한 언니".to_string());
        let bundle = service.generate_bundle(&req).await.expect("bundle");
        assert_eq!(bundle.thumbnail_options, vec!["A"]);

        let prompt = &backend.requests()[0].messages[1].content;
        assert!(prompt.contains("브랜드 보이스: 친근한 언니"));
        assert!(!prompt.contains(NO_BRAND_VOICE));
    }

    #[tokio::test]
    async fn test_missing_hook_is_shape_error() {
        let backend = CannedBackend::new(&[r#"{"script": "s", "cta": "c"}"#]);
        let service = ScriptService::new(gateway(&backend));

        let err = service.generate_bundle(&request()).await.expect_err("no hook");
        assert_eq!(err.kind(), ErrorKind::ReplyShape);
        assert!(err.to_string().contains("hook"));
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed() {
        let backend = CannedBackend::new(&["죄송하지만 도와드릴 수 없습니다."]);
        let service = ScriptService::new(gateway(&backend));

        let err = service.generate_bundle(&request()).await.expect_err("prose");
        assert_eq!(err.kind(), ErrorKind::MalformedStructuredReply);
    }

    #[test]
    fn test_parse_script_defaults_and_coercions() {
        let payload = match json!({
            "script": "s", "hook": "h", "cta": "c",
            "description": "d", "duration_seconds": "45", "talking_points": null
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let draft = parse_script(payload).expect("valid");
        assert_eq!(draft.description, "d");
        assert_eq!(draft.duration_seconds, 45);
        assert!(draft.talking_points.is_empty());
    }

    #[test]
    fn test_loose_talking_points_do_not_fail_the_bundle() {
        let to_map = |value: Value| match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let draft = parse_script(to_map(json!({
            "script": "s", "hook": "h", "cta": "c", "talking_points": "노이즈 캔슬링"
        })))
        .expect("single string");
        assert_eq!(draft.talking_points, vec!["노이즈 캔슬링"]);

        let draft = parse_script(to_map(json!({
            "script": "s", "hook": "h", "cta": "c", "talking_points": {"first": "x"}
        })))
        .expect("object");
        assert!(draft.talking_points.is_empty());
    }

    #[test]
    fn test_parse_thumbnail_options() {
        assert_eq!(
            parse_thumbnail_options(json!(["a", 1])).ok(),
            Some(vec!["a".to_string(), "1".to_string()])
        );
        assert_eq!(
            parse_thumbnail_options(json!({"options": ["x"]})).ok(),
            Some(vec!["x".to_string()])
        );

        for bad in [json!({"captions": []}), json!({"options": "x"}), json!("x")] {
            let err = parse_thumbnail_options(bad).expect_err("bad shape");
            assert_eq!(err.kind(), ErrorKind::ReplyShape);
        }
    }
}
