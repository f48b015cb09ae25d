//! Compiled-in prompt templates.
//!
//! Templates use `{name}` placeholders filled by [`render`].

/// System turn for script generation
pub const SCRIPT_SYSTEM_PROMPT: &str = "당신은 쇼핑 숏폼 대본을 전문적으로 작성하는 시니어 카피라이터입니다. \
상품의 장점과 감성을 30초 분량으로 설득력 있게 구성하세요. \
응답은 반드시 JSON 형식으로만 작성합니다.";

/// System turn for thumbnail captions
pub const THUMBNAIL_SYSTEM_PROMPT: &str = "당신은 짧고 임팩트 있는 한국어 카피를 만드는 숏폼 마케터입니다. \
출력은 JSON 배열 형태로만 응답하세요.";

/// System turn for keyword translation
pub const KEYWORD_SYSTEM_PROMPT: &str = "당신은 이커머스 마케팅 키워드 전략가입니다. \
상품에 대한 검색 키워드를 한국어와 중국어 간체로 구성하고, \
Douyin 검색에 적합한 제안 검색어를 만들어 주세요. \
응답은 JSON 객체로만 작성합니다.";

/// Substituted for a missing brand voice
pub const NO_BRAND_VOICE: &str = "특별한 브랜드 보이스 없음";

/// Script request template
pub const SCRIPT_TEMPLATE: &str = "\
다음 상품의 숏폼 영상 대본을 작성해 주세요.

- 상품명: {product_name}
- 타깃 고객: {target_audience}
- 톤앤매너: {tone}
- 영상 스타일: {style}
- 작성 언어: {language}
- 브랜드 보이스: {brand_voice}

아래 키를 가진 JSON 객체 하나로만 응답하세요.
{
  \"hook\": \"첫 3초 안에 시선을 잡는 한 문장\",
  \"script\": \"나레이션 전체 대본\",
  \"cta\": \"구매를 유도하는 마무리 문장\",
  \"talking_points\": [\"핵심 소구점\"],
  \"description\": \"영상 설명란 문구\",
  \"duration_seconds\": 30
}";

/// Thumbnail caption template
pub const THUMBNAIL_TEMPLATE: &str = "\
다음 숏폼 영상의 썸네일 문구 후보 5개를 만들어 주세요.

- 상품명: {product_name}
- 타깃 고객: {target_audience}
- 톤앤매너: {tone}
- 영상 스타일: {style}
- 영상 훅: {hook}

각 문구는 15자 이내로 작성하고, 문자열 JSON 배열로만 응답하세요.";

/// Keyword translation template
pub const KEYWORD_TEMPLATE: &str = "\
다음 상품을 Douyin 에서 찾기 위한 검색 키워드를 만들어 주세요.

- 상품명: {product_name}
- 타깃 고객: {target_audience}
- 톤앤매너: {tone}
- 영상 스타일: {style}

아래 키를 가진 JSON 객체 하나로만 응답하세요.
{
  \"korean_keywords\": [\"한국어 키워드\"],
  \"chinese_keywords\": [\"中文关键词\"],
  \"douyin_search_queries\": [\"抖音搜索词\"]
}";

/// Fill `{name}` placeholders in `template`.
///
/// Placeholders without a value are left as-is.
#[must_use]
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
}
