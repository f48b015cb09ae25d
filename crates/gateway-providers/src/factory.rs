//! Backend selection.

use crate::google::{GoogleBackend, GoogleConfig};
use crate::openai::{OpenAIBackend, OpenAIConfig};
use gateway_config::ResolvedBackend;
use gateway_core::{ChatBackend, GatewayResult, ProviderType};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::debug;

/// Construct the backend described by `resolved`.
///
/// # Errors
/// Returns error if the HTTP client cannot be created
pub fn build_backend(resolved: &ResolvedBackend) -> GatewayResult<Arc<dyn ChatBackend>> {
    let api_key = resolved.api_key.expose_secret().clone();

    let backend: Arc<dyn ChatBackend> = match resolved.provider {
        ProviderType::OpenAI => Arc::new(OpenAIBackend::new(
            OpenAIConfig::new(api_key)
                .with_model(&resolved.model)
                .with_base_url(&resolved.base_url)
                .with_timeout(resolved.request_timeout),
        )?),
        ProviderType::Gemini => Arc::new(GoogleBackend::new(
            GoogleConfig::google_ai(api_key)
                .with_model(&resolved.model)
                .with_base_url(&resolved.base_url)
                .with_timeout(resolved.request_timeout),
        )?),
    };

    debug!(
        provider = %resolved.provider,
        model = %resolved.model,
        base_url = %resolved.base_url,
        "Built chat backend"
    );

    Ok(backend)
}
