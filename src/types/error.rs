//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Classifies generation failures into categories that drive retry decisions.
//!
//! ## Error Categories
//!
//! - **Transient**: Temporary service issues (retry)
//! - **RateLimit**: API rate limiting (wait and retry)
//! - **Auth**: Authentication failures (fail fast)
//! - **Network**: Connectivity issues (retry with backoff)
//! - **BadRequest**: Invalid request (fail fast)
//!
//! ## Design Principles
//!
//! - Single unified error type (AquaError) for the entire application
//! - Category-based routing for retry decisions
//! - No panic/unwrap - all errors are recoverable

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for retry routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited - wait then retry
    RateLimit,
    /// Authentication failed - fail fast, don't retry
    Auth,
    /// Network/connectivity issues - retry with backoff
    Network,
    /// Invalid request - don't retry, fix request
    BadRequest,
    /// Response shape did not match expectations - don't retry
    MalformedResponse,
    /// Temporary server issues - retry
    Transient,
    /// Unknown error - conservative, no retry
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Check if this category is worth retrying against the same service
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit | Self::Network | Self::Transient)
    }

    /// Get recommended retry delay for this category
    pub fn recommended_delay(&self) -> Duration {
        match self {
            Self::RateLimit => Duration::from_secs(30),
            Self::Network => Duration::from_secs(5),
            Self::Transient => Duration::from_secs(2),
            _ => Duration::from_millis(500),
        }
    }
}

// =============================================================================
// Generation Error
// =============================================================================

/// Generation service error with category, context, and retry hints
#[derive(Debug, Clone)]
pub struct GenerationError {
    /// Error category for routing decisions
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Suggested wait time before retry (if applicable)
    pub retry_after: Option<Duration>,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

impl std::error::Error for GenerationError {}

impl GenerationError {
    /// Create a new generation error
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Add suggested retry delay
    pub fn retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    /// Create from simple message (defaults to Unknown category)
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unknown, message)
    }

    /// Check if error is worth retrying
    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }

    /// Get recommended retry delay
    pub fn recommended_delay(&self) -> Duration {
        self.retry_after
            .unwrap_or_else(|| self.category.recommended_delay())
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Error classifier for retry routing
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from the generation service
    pub fn classify(message: &str) -> GenerationError {
        let lower = message.to_lowercase();

        // Rate limiting patterns
        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
            || lower.contains("resource_exhausted")
        {
            return GenerationError::new(ErrorCategory::RateLimit, message)
                .retry_after(Duration::from_secs(30));
        }

        // Authentication patterns
        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("invalid key")
            || lower.contains("unauthorized")
            || lower.contains("permission denied")
        {
            return GenerationError::new(ErrorCategory::Auth, message);
        }

        // Network patterns
        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return GenerationError::new(ErrorCategory::Network, message)
                .retry_after(Duration::from_secs(5));
        }

        // Transient server-side patterns
        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("500")
            || lower.contains("service unavailable")
            || lower.contains("server error")
            || lower.contains("internal error")
            || lower.contains("overloaded")
            || lower.contains("temporary")
        {
            return GenerationError::new(ErrorCategory::Transient, message)
                .retry_after(Duration::from_secs(2));
        }

        // Bad request patterns
        if lower.contains("400")
            || lower.contains("bad request")
            || lower.contains("invalid")
            || lower.contains("malformed")
        {
            return GenerationError::new(ErrorCategory::BadRequest, message);
        }

        // Response parsing patterns
        if lower.contains("parse") || lower.contains("json") || lower.contains("decode") {
            return GenerationError::new(ErrorCategory::MalformedResponse, message);
        }

        // Default: unknown error
        GenerationError::new(ErrorCategory::Unknown, message)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str) -> GenerationError {
        match status {
            429 => GenerationError::new(ErrorCategory::RateLimit, message)
                .retry_after(Duration::from_secs(30)),
            401 | 403 => GenerationError::new(ErrorCategory::Auth, message),
            400 | 404 => GenerationError::new(ErrorCategory::BadRequest, message),
            // 500 series are transient - can retry
            500 | 502 | 503 | 504 => GenerationError::new(ErrorCategory::Transient, message)
                .retry_after(Duration::from_secs(5)),
            _ => GenerationError::new(ErrorCategory::Unknown, message),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AquaError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    /// Structured generation error with category and retry hints
    #[error("Generation error: {0}")]
    Generation(GenerationError),

    /// Simple generation API error (use Generation variant for structured errors)
    #[error("Generation API error: {0}")]
    GenerationApi(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Credential error: {0}")]
    Credential(String),
}

impl From<GenerationError> for AquaError {
    fn from(err: GenerationError) -> Self {
        AquaError::Generation(err)
    }
}

pub type Result<T> = std::result::Result<T, AquaError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl AquaError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a generation error from message (convenience wrapper)
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(GenerationError::from_message(message))
    }

    /// Create a generation error with category
    pub fn generation_with_category(
        category: ErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self::Generation(GenerationError::new(category, message))
    }

    /// Check if this error is worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Generation(e) => e.is_retryable(),
            Self::GenerationApi(msg) => ErrorClassifier::classify(msg).is_retryable(),
            // Per-attempt timeouts can be retried
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Suggested delay before the next attempt
    pub fn recommended_delay(&self) -> Option<Duration> {
        match self {
            Self::Generation(e) => Some(e.recommended_delay()),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
