//! Generation Provider Abstraction
//!
//! Defines the GenerationProvider trait for plain-text generation with
//! optional web-grounded search. The concrete Gemini provider lives in
//! `gemini`; tests substitute stub implementations.

mod credentials;
mod gemini;

pub use credentials::{CredentialResolver, EnvCredentials, SharedCredentials, StaticCredentials};
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::constants::generation as gen_constants;
use crate::types::Result;

// =============================================================================
// Exchange Types
// =============================================================================

/// Per-request generation options
///
/// Mirrors the options bag the service recognizes: output length cap,
/// optional sampling temperature, and the search-grounding tool switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// Cap on generated output length
    pub max_output_tokens: u32,
    /// Sampling temperature; `None` leaves the service default in place
    pub temperature: Option<f32>,
    /// Enable the web-grounded search tool for this request
    pub search_grounding: bool,
}

impl GenerationOptions {
    pub fn new(max_output_tokens: u32) -> Self {
        Self {
            max_output_tokens,
            temperature: None,
            search_grounding: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_search_grounding(mut self) -> Self {
        self.search_grounding = true;
        self
    }
}

/// A grounding chunk as returned by the service, both fields optional.
///
/// Filtering (dropping chunks without a URI) and title defaulting happen in
/// the advisory client, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroundingChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Raw generation result: text plus grounding chunks in service order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generation {
    /// Generated text; `None` when the service returned no text parts
    pub text: Option<String>,
    /// Grounding chunks, present only for grounded requests
    pub grounding: Vec<GroundingChunk>,
}

impl Generation {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            grounding: Vec::new(),
        }
    }
}

/// Shared provider handle for concurrent callers
pub type SharedProvider = Arc<dyn GenerationProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for the generation provider
///
/// Note: API keys are handled via a [`CredentialResolver`] resolved at call
/// time, never stored here, so configs can be logged and serialized freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model name
    pub model: String,
    /// API base URL (for custom endpoints)
    pub api_base: String,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: gen_constants::DEFAULT_MODEL.to_string(),
            api_base: gen_constants::DEFAULT_API_BASE.to_string(),
            timeout_secs: crate::constants::network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Generation Provider Trait
// =============================================================================

/// Provider trait for plain-text generation
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for a prompt with the given options
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared Gemini provider from configuration
pub fn create_provider(
    config: &ProviderConfig,
    credentials: SharedCredentials,
) -> Result<SharedProvider> {
    Ok(Arc::new(GeminiProvider::new(config.clone(), credentials)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = GenerationOptions::new(300).with_search_grounding();
        assert_eq!(options.max_output_tokens, 300);
        assert_eq!(options.temperature, None);
        assert!(options.search_grounding);

        let options = GenerationOptions::new(150).with_temperature(0.8);
        assert_eq!(options.temperature, Some(0.8));
        assert!(!options.search_grounding);
    }

    #[test]
    fn test_default_provider_config() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert!(config.api_base.starts_with("https://"));
    }
}
