//! Configuration model.
//!
//! A [`GatewayConfig`] holds settings for every supported provider plus the
//! shared timeout and retry knobs. [`GatewayConfig::resolve`] narrows it to
//! the single backend a gateway is bound to.

use gateway_core::{GatewayError, GatewayResult, ProviderType};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Default per-attempt timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default total number of attempts (initial call plus retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause after each Gemini call (free tier allows 15 requests/minute)
pub const GEMINI_POST_CALL_DELAY: Duration = Duration::from_secs(4);

/// Default API base URL for a provider
#[must_use]
pub fn default_base_url(provider: ProviderType) -> &'static str {
    match provider {
        ProviderType::OpenAI => "https://api.openai.com",
        ProviderType::Gemini => "https://generativelanguage.googleapis.com",
    }
}

/// Default post-call throttle for a provider
#[must_use]
pub fn default_post_call_delay(provider: ProviderType) -> Duration {
    match provider {
        ProviderType::OpenAI => Duration::ZERO,
        ProviderType::Gemini => GEMINI_POST_CALL_DELAY,
    }
}

/// Per-provider settings. Unset fields fall back to provider defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    /// API credential
    pub api_key: Option<SecretString>,
    /// Model identifier
    pub model: Option<String>,
    /// API base URL
    pub base_url: Option<String>,
    /// Pause applied after every successful call
    #[serde(with = "humantime_serde")]
    pub post_call_delay: Option<Duration>,
}

impl ProviderSettings {
    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the post-call delay
    #[must_use]
    pub fn with_post_call_delay(mut self, delay: Duration) -> Self {
        self.post_call_delay = Some(delay);
        self
    }

    fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}

/// Retry knobs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    /// Total attempts including the first call
    pub max_attempts: u32,
    /// Delay before the first retry
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,
    /// Lower bound for any delay
    #[serde(with = "humantime_serde")]
    pub min_delay: Duration,
    /// Upper bound for any delay
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
    /// Growth factor between consecutive delays
    pub multiplier: f64,
    /// Random jitter as a fraction of the delay (0.0 - 1.0)
    pub jitter: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(2),
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: 0.0,
        }
    }
}

/// Complete gateway configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Selected provider
    pub provider: ProviderType,
    /// OpenAI settings
    pub openai: ProviderSettings,
    /// Gemini settings
    pub gemini: ProviderSettings,
    /// Per-attempt timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Retry settings
    pub retry: RetrySettings,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::default(),
            openai: ProviderSettings::default(),
            gemini: ProviderSettings::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetrySettings::default(),
        }
    }
}

impl GatewayConfig {
    /// Configuration selecting `provider` with everything else defaulted
    #[must_use]
    pub fn for_provider(provider: ProviderType) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Replace the settings of one provider
    #[must_use]
    pub fn with_settings(mut self, provider: ProviderType, settings: ProviderSettings) -> Self {
        *self.settings_mut(provider) = settings;
        self
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the retry settings
    #[must_use]
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    /// Settings for `provider`
    #[must_use]
    pub fn settings(&self, provider: ProviderType) -> &ProviderSettings {
        match provider {
            ProviderType::OpenAI => &self.openai,
            ProviderType::Gemini => &self.gemini,
        }
    }

    /// Mutable settings for `provider`
    pub fn settings_mut(&mut self, provider: ProviderType) -> &mut ProviderSettings {
        match provider {
            ProviderType::OpenAI => &mut self.openai,
            ProviderType::Gemini => &mut self.gemini,
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns a configuration error describing the first invalid value
    pub fn validate(&self) -> GatewayResult<()> {
        if self.request_timeout.is_zero() {
            return Err(GatewayError::configuration(
                "request_timeout must be greater than zero",
            ));
        }

        let retry = &self.retry;
        if retry.max_attempts == 0 {
            return Err(GatewayError::configuration(
                "retry.max_attempts must be at least 1",
            ));
        }
        if !retry.multiplier.is_finite() || retry.multiplier < 1.0 {
            return Err(GatewayError::configuration(
                "retry.multiplier must be a finite number >= 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&retry.jitter) {
            return Err(GatewayError::configuration(
                "retry.jitter must be between 0.0 and 1.0",
            ));
        }
        if retry.min_delay > retry.max_delay {
            return Err(GatewayError::configuration(
                "retry.min_delay must not exceed retry.max_delay",
            ));
        }

        for provider in [ProviderType::OpenAI, ProviderType::Gemini] {
            if let Some(url) = &self.settings(provider).base_url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(GatewayError::configuration(format!(
                        "{provider}.base_url must be an http(s) URL, got '{url}'"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve the selected provider into a concrete backend description.
    ///
    /// `model_override` wins over the configured model, which wins over the
    /// provider default.
    ///
    /// # Errors
    /// Returns a configuration error when the selected provider has no
    /// credential, or when [`validate`](Self::validate) fails.
    pub fn resolve(&self, model_override: Option<&str>) -> GatewayResult<ResolvedBackend> {
        self.validate()?;

        let provider = self.provider;
        let settings = self.settings(provider);

        let api_key = match &settings.api_key {
            Some(key) if settings.has_api_key() => key.clone(),
            _ => {
                return Err(GatewayError::configuration(format!(
                    "{} is not set; it is required when the provider is '{provider}'",
                    crate::loader::api_key_var(provider)
                )))
            }
        };

        let model = non_empty(model_override)
            .or_else(|| non_empty(settings.model.as_deref()))
            .unwrap_or_else(|| provider.default_model())
            .to_string();

        let base_url = non_empty(settings.base_url.as_deref())
            .unwrap_or_else(|| default_base_url(provider))
            .trim_end_matches('/')
            .to_string();

        Ok(ResolvedBackend {
            provider,
            model,
            api_key,
            base_url,
            request_timeout: self.request_timeout,
            post_call_delay: settings
                .post_call_delay
                .unwrap_or_else(|| default_post_call_delay(provider)),
            retry: self.retry.clone(),
        })
    }
}

/// Everything needed to construct one backend
#[derive(Debug, Clone)]
pub struct ResolvedBackend {
    /// Provider
    pub provider: ProviderType,
    /// Model identifier
    pub model: String,
    /// API credential
    pub api_key: SecretString,
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-attempt timeout
    pub request_timeout: Duration,
    /// Pause after each successful call
    pub post_call_delay: Duration,
    /// Retry settings
    pub retry: RetrySettings,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
