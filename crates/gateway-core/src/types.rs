//! Validated domain types.

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling temperature in `[0.0, 2.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Temperature(pub(crate) f32);

impl Temperature {
    /// Lowest accepted value
    pub const MIN: f32 = 0.0;
    /// Highest accepted value
    pub const MAX: f32 = 2.0;

    /// Create a validated temperature
    ///
    /// # Errors
    /// Returns a validation error if the value is outside `[0.0, 2.0]` or not finite
    pub fn new(value: f32) -> GatewayResult<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GatewayError::validation(
                format!("temperature must be between 0.0 and 2.0, got {value}"),
                Some("temperature".to_string()),
                "invalid_temperature",
            ))
        }
    }

    /// Raw value
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Temperature {
    type Error = GatewayError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f32 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum number of output tokens, at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaxTokens(pub(crate) u32);

impl MaxTokens {
    /// Create a validated token limit
    ///
    /// # Errors
    /// Returns a validation error if the value is zero
    pub fn new(value: u32) -> GatewayResult<Self> {
        if value == 0 {
            return Err(GatewayError::validation(
                "max_output_tokens must be positive",
                Some("max_output_tokens".to_string()),
                "invalid_max_tokens",
            ));
        }
        Ok(Self(value))
    }

    /// Raw value
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for MaxTokens {
    type Error = GatewayError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaxTokens> for u32 {
    fn from(t: MaxTokens) -> Self {
        t.0
    }
}

impl fmt::Display for MaxTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
