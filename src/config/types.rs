//! Configuration Types
//!
//! Configuration structures with sensible defaults. Operation-level
//! generation profiles (token caps, temperatures, the grounding switch) are
//! product behavior and stay in `constants`; config covers the service
//! endpoint and call policy.

use serde::{Deserialize, Serialize};

use crate::ai::{ProviderConfig, RetryPolicy, TimeoutConfig};
use crate::constants::{generation as gen_constants, network, retry};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Generation service settings
    pub llm: LlmConfig,

    /// Retry policy settings
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AquaError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.llm.timeout_secs == 0 {
            return Err(crate::types::AquaError::Config(
                "llm timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.model.is_empty() {
            return Err(crate::types::AquaError::Config(
                "llm model must not be empty".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(crate::types::AquaError::Config(
                "retry max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Provider configuration derived from the llm section
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            model: self.llm.model.clone(),
            api_base: self.llm.api_base.clone(),
            timeout_secs: self.llm.timeout_secs,
        }
    }

    /// Retry policy derived from the retry section
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_max_attempts(self.retry.max_attempts)
    }

    /// Timeout configuration derived from the llm section
    pub fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::from_secs(self.llm.timeout_secs)
    }
}

// =============================================================================
// Generation Service Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model name
    pub model: String,

    /// API base URL
    pub api_base: String,

    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: gen_constants::DEFAULT_MODEL.to_string(),
            api_base: gen_constants::DEFAULT_API_BASE.to_string(),
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Retry Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum attempts per operation, first try included
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: retry::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.model, "gemini-3-flash-preview");
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_policies() {
        let mut config = Config::default();
        config.llm.timeout_secs = 7;
        config.retry.max_attempts = 5;

        assert_eq!(config.timeout_config().generation_request.as_secs(), 7);
        assert_eq!(config.retry_policy().max_attempts, 5);
        assert_eq!(config.provider_config().timeout_secs, 7);
    }
}
