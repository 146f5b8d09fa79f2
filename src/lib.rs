//! AQUANET Advisory Engine
//!
//! AI-assisted advisory text for the AQUANET water-monitoring suite: usage
//! tips, a web-grounded assistant, and listing-copy advice for the LUMINA
//! publishing surface.
//!
//! ## Core Features
//!
//! - **Advisory Client**: three stateless operations that always yield
//!   display-ready text, never an error
//! - **Explicit Degradation**: [`types::Advice`] distinguishes generated
//!   text from the per-operation fallback paths
//! - **Grounded Answers**: assistant responses carry flattened citations
//!   when the service grounded them in web search
//! - **Call Policy**: per-attempt timeouts and classification-driven retry
//!   around the generation service
//!
//! ## Quick Start
//!
//! ```ignore
//! use aquanet::ai::{AdvisoryClient, EnvCredentials, create_provider, ProviderConfig};
//!
//! let provider = create_provider(&ProviderConfig::default(), EnvCredentials::shared())?;
//! let client = AdvisoryClient::new(provider);
//! let tip = client.generate_usage_tip("Daily usage is 15L").await;
//! println!("{}", tip.into_text());
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: advisory client, generation provider, timeout/retry plumbing
//! - [`config`]: figment-based configuration loading
//! - [`types`]: advisory domain types and the error system
//! - [`cli`]: command implementations for the `aquanet` binary

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{AquaError, ErrorCategory, Result};

// Advisory Types
pub use types::{Advice, AdvisoryRequest, AdvisoryResponse, Citation, FallbackReason};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    AdvisoryClient,
    EnvCredentials,
    GeminiProvider,
    GenerationOptions,
    GenerationProvider,
    ProviderConfig,
    RetryPolicy,
    SharedProvider,
    TimeoutConfig,
    create_provider,
};
