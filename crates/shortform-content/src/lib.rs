//! # Shortform Content
//!
//! Caller-side builders for short-form shopping videos. Each builder sends a
//! system and a user turn through a [`gateway_client::Gateway`] and reads the
//! structured reply with [`gateway_normalizer`]:
//! - [`ScriptService`]: narration script, hook, CTA and thumbnail captions
//! - [`KeywordTranslator`]: Korean/Chinese keywords and Douyin search queries

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod keywords;
mod payload;
pub mod prompts;
pub mod script;
pub mod slug;

#[cfg(test)]
mod testing;

pub use keywords::{KeywordBundle, KeywordRequest, KeywordTranslator, KEYWORD_TEMPERATURE};
pub use script::{ScriptBundle, ScriptRequest, ScriptService, THUMBNAIL_TEMPERATURE};
pub use slug::slugify;
