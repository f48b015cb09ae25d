//! Gateway facade.

use gateway_config::{
    default_post_call_delay, GatewayConfig, RetrySettings, DEFAULT_REQUEST_TIMEOUT,
};
use gateway_core::{
    ChatBackend, ChatMessage, CompletionRequest, GatewayError, GatewayResult, GenerationOverrides,
    GenerationParams, ProviderType,
};
use gateway_providers::build_backend;
use gateway_resilience::{RetryPolicy, RetryPolicyBuilder, Throttle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Construction-time choices layered over the configuration
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    /// Model override; wins over the configured model
    pub model: Option<String>,
    /// Default temperature for every call
    pub temperature: Option<f32>,
    /// Default output length limit for every call
    pub max_output_tokens: Option<u32>,
}

impl GatewayOptions {
    /// Set the model override
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the default temperature
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the default output length limit
    #[must_use]
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// One backend behind retry, a per-attempt timeout and a post-call throttle
pub struct Gateway {
    backend: Arc<dyn ChatBackend>,
    defaults: GenerationParams,
    retry: RetryPolicy,
    throttle: Throttle,
    request_timeout: Duration,
}

impl Gateway {
    /// Build a gateway from configuration.
    ///
    /// # Errors
    /// Returns a configuration error if the selected provider has no
    /// credential, or a validation error if an option is out of range.
    pub fn from_config(config: &GatewayConfig, options: GatewayOptions) -> GatewayResult<Self> {
        let resolved = config.resolve(options.model.as_deref())?;
        let defaults = GenerationParams::default().with_overrides(&GenerationOverrides {
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
        })?;
        let backend = build_backend(&resolved)?;

        let gateway = Self::with_backend(backend, defaults)
            .with_retry(retry_policy(&resolved.retry))
            .with_throttle(Throttle::fixed(resolved.post_call_delay))
            .with_request_timeout(resolved.request_timeout);

        info!(
            provider = %gateway.provider(),
            model = %gateway.model(),
            temperature = %gateway.defaults.temperature,
            max_attempts = resolved.retry.max_attempts,
            "Generation gateway ready"
        );

        Ok(gateway)
    }

    /// Wrap an existing backend.
    ///
    /// Retry, throttle and timeout start at the provider defaults.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn ChatBackend>, defaults: GenerationParams) -> Self {
        let throttle = Throttle::fixed(default_post_call_delay(backend.provider_type()));
        Self {
            backend,
            defaults,
            retry: RetryPolicy::default(),
            throttle,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the post-call throttle
    #[must_use]
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Replace the per-attempt timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Provider of the bound backend
    #[must_use]
    pub fn provider(&self) -> ProviderType {
        self.backend.provider_type()
    }

    /// Model of the bound backend
    #[must_use]
    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Default generation parameters
    #[must_use]
    pub fn defaults(&self) -> GenerationParams {
        self.defaults
    }

    /// Send a conversation and return the reply text.
    ///
    /// Overrides apply to this call only. Transport and backend failures are
    /// retried with backoff; after the last attempt the final error is
    /// returned unchanged.
    ///
    /// # Errors
    /// - validation error for empty `turns` or out-of-range overrides (no call is made)
    /// - [`GatewayError::EmptyReply`] when the backend returns nothing usable
    /// - the last transient error once attempts are exhausted
    #[instrument(skip_all, fields(provider = %self.provider(), model = %self.model(), turns = turns.len()))]
    pub async fn send(
        &self,
        turns: &[ChatMessage],
        overrides: GenerationOverrides,
    ) -> GatewayResult<String> {
        let params = self.defaults.with_overrides(&overrides)?;
        let request = CompletionRequest::new(turns.to_vec(), params)?;

        let backend = &self.backend;
        let request = &request;
        let timeout = self.request_timeout;

        let outcome = self
            .retry
            .execute_tracked(move || async move {
                match tokio::time::timeout(timeout, backend.complete(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(GatewayError::timeout(timeout)),
                }
            })
            .await;

        debug!(
            attempts = outcome.report().attempts,
            success = outcome.is_success(),
            "Send finished"
        );

        let reply = outcome.into_result()?;
        self.throttle.pause().await;
        Ok(reply)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("provider", &self.provider())
            .field("model", &self.model())
            .field("defaults", &self.defaults)
            .field("retry", &self.retry)
            .field("throttle", &self.throttle)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn retry_policy(settings: &RetrySettings) -> RetryPolicy {
    RetryPolicyBuilder::new()
        .max_attempts(settings.max_attempts)
        .base_delay(settings.base_delay)
        .min_delay(settings.min_delay)
        .max_delay(settings.max_delay)
        .multiplier(settings.multiplier)
        .jitter(settings.jitter)
        .build()
}
