//! Credential Resolution
//!
//! The API key is resolved at call time rather than cached at provider
//! construction, so a rotated key takes effect on the next request and tests
//! can inject a fixed key without touching process environment.

use secrecy::SecretString;
use std::sync::Arc;

use crate::constants::generation as gen_constants;
use crate::types::{AquaError, Result};

/// Resolves the generation service credential for a single call
pub trait CredentialResolver: Send + Sync {
    /// Resolve the current API key
    fn resolve(&self) -> Result<SecretString>;
}

/// Shared resolver handle
pub type SharedCredentials = Arc<dyn CredentialResolver>;

/// Reads the API key from the process environment on every call
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    pub fn shared() -> SharedCredentials {
        Arc::new(Self)
    }
}

impl CredentialResolver for EnvCredentials {
    fn resolve(&self) -> Result<SecretString> {
        match std::env::var(gen_constants::API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(SecretString::from(key)),
            _ => Err(AquaError::Credential(format!(
                "API key not found. Set the {} environment variable",
                gen_constants::API_KEY_ENV
            ))),
        }
    }
}

/// Fixed key, for tests and embedding scenarios
pub struct StaticCredentials {
    key: SecretString,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::from(key.into()),
        }
    }

    pub fn shared(key: impl Into<String>) -> SharedCredentials {
        Arc::new(Self::new(key))
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl CredentialResolver for StaticCredentials {
    fn resolve(&self) -> Result<SecretString> {
        Ok(self.key.clone())
    }
}
