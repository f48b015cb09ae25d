//! Loading configuration from the environment and TOML files.

use crate::config::GatewayConfig;
use gateway_core::{GatewayError, GatewayResult, ProviderType};
use secrecy::SecretString;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Provider selector
pub const ENV_PROVIDER: &str = "AI_PROVIDER";
/// OpenAI credential
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// OpenAI model
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
/// OpenAI base URL
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
/// Gemini credential
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Gemini model
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
/// Gemini base URL
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
/// Per-attempt timeout in whole seconds
pub const ENV_TIMEOUT_SECS: &str = "GATEWAY_TIMEOUT_SECS";
/// Total attempts per send
pub const ENV_MAX_ATTEMPTS: &str = "GATEWAY_MAX_ATTEMPTS";

/// Name of the environment variable holding `provider`'s credential
#[must_use]
pub fn api_key_var(provider: ProviderType) -> &'static str {
    match provider {
        ProviderType::OpenAI => ENV_OPENAI_API_KEY,
        ProviderType::Gemini => ENV_GEMINI_API_KEY,
    }
}

fn provider_vars(provider: ProviderType) -> (&'static str, &'static str, &'static str) {
    match provider {
        ProviderType::OpenAI => (ENV_OPENAI_API_KEY, ENV_OPENAI_MODEL, ENV_OPENAI_BASE_URL),
        ProviderType::Gemini => (ENV_GEMINI_API_KEY, ENV_GEMINI_MODEL, ENV_GEMINI_BASE_URL),
    }
}

impl GatewayConfig {
    /// Build a configuration from process environment variables.
    ///
    /// # Errors
    /// Returns a configuration error for unparseable or invalid values
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns a configuration error for unparseable or invalid values
    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    /// Returns a configuration error when the document is not valid
    pub fn from_toml_str(content: &str) -> GatewayResult<Self> {
        let config = parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file and overlay process environment variables.
    ///
    /// # Errors
    /// Returns a configuration error when the file cannot be read or parsed
    pub fn load_file(path: impl AsRef<Path>) -> GatewayResult<Self> {
        Self::load_file_with_lookup(path, |key| std::env::var(key).ok())
    }

    /// Load a TOML file and overlay values from `lookup`.
    ///
    /// # Errors
    /// Returns a configuration error when the file cannot be read or parsed
    pub fn load_file_with_lookup<F>(path: impl AsRef<Path>, lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::configuration(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "Loaded configuration file");

        let mut config = parse_toml(&content)?;
        config.apply_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay every set, non-blank variable from `lookup` onto this configuration.
    ///
    /// # Errors
    /// Returns a configuration error for unparseable values
    pub fn apply_lookup<F>(&mut self, lookup: F) -> GatewayResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(provider) = get(ENV_PROVIDER) {
            self.provider = provider.parse()?;
        }

        for provider in [ProviderType::OpenAI, ProviderType::Gemini] {
            let (key_var, model_var, url_var) = provider_vars(provider);
            let settings = self.settings_mut(provider);
            if let Some(key) = get(key_var) {
                settings.api_key = Some(SecretString::new(key));
            }
            if let Some(model) = get(model_var) {
                settings.model = Some(model);
            }
            if let Some(url) = get(url_var) {
                settings.base_url = Some(url);
            }
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                GatewayError::configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }

        if let Some(attempts) = get(ENV_MAX_ATTEMPTS) {
            self.retry.max_attempts = attempts.parse().map_err(|_| {
                GatewayError::configuration(format!(
                    "{ENV_MAX_ATTEMPTS} must be a positive integer, got '{attempts}'"
                ))
            })?;
        }

        Ok(())
    }
}

fn parse_toml(content: &str) -> GatewayResult<GatewayConfig> {
    toml::from_str(content)
        .map_err(|e| GatewayError::configuration(format!("invalid configuration: {e}")))
}
