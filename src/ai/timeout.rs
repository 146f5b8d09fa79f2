//! Unified Timeout Configuration
//!
//! Centralized timeout management with per-operation defaults and a helper
//! for wrapping async operations in a deadline.

use std::future::Future;
use std::time::Duration;

use crate::constants::network as net_constants;
use crate::types::{AquaError, Result};

/// Timeout configuration for outbound calls
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Timeout for a single generation request attempt (default: 30 seconds)
    pub generation_request: Duration,
    /// Timeout for establishing a connection (default: 10 seconds)
    pub connection: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            generation_request: Duration::from_secs(net_constants::DEFAULT_TIMEOUT_SECS),
            connection: Duration::from_secs(net_constants::CONNECTION_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    pub fn from_secs(generation_secs: u64) -> Self {
        Self {
            generation_request: Duration::from_secs(generation_secs),
            ..Default::default()
        }
    }
}

/// Execute an async operation with a timeout
///
/// Returns a timeout error if the operation doesn't complete within the
/// specified duration.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(AquaError::timeout(operation_name, timeout)),
    }
}
