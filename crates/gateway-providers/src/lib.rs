//! # Gateway Providers
//!
//! Chat backends for the shortform generation gateway:
//! - OpenAI chat completions (native system role, multi-turn history)
//! - Google Gemini `generateContent` (system instruction, flattened prompt)
//!
//! [`build_backend`] picks one from a resolved configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod factory;
pub mod google;
pub mod openai;

pub use factory::build_backend;
pub use google::{GoogleBackend, GoogleConfig};
pub use openai::{OpenAIBackend, OpenAIConfig};
