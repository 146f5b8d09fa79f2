//! AI Integration Layer
//!
//! Advisory client, generation provider abstraction, prompts, and the
//! timeout/retry plumbing around outbound calls.

pub mod client;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod timeout;

pub use client::AdvisoryClient;
pub use provider::{
    CredentialResolver, EnvCredentials, GeminiProvider, Generation, GenerationOptions,
    GenerationProvider, GroundingChunk, ProviderConfig, SharedCredentials, SharedProvider,
    StaticCredentials, create_provider,
};
pub use retry::RetryPolicy;
pub use timeout::{TimeoutConfig, with_timeout};
