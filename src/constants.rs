//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Generation service constants
pub mod generation {
    /// Default model identifier
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

    /// Default API base URL
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
}

/// Per-operation generation profiles
pub mod profiles {
    /// Usage tip: short output, varied phrasing
    pub const TIP_MAX_OUTPUT_TOKENS: u32 = 150;
    pub const TIP_TEMPERATURE: f32 = 0.8;

    /// Assistant: medium output, search grounding, provider-default sampling
    pub const ASSISTANT_MAX_OUTPUT_TOKENS: u32 = 300;

    /// Content advice: longer output, mildly varied phrasing
    pub const CONTENT_MAX_OUTPUT_TOKENS: u32 = 500;
    pub const CONTENT_TEMPERATURE: f32 = 0.7;
}

/// Fixed degraded-mode strings, one pair per operation
pub mod fallbacks {
    /// Tip: service answered with empty text
    pub const TIP_EMPTY: &str = "Keep up the great work saving water!";
    /// Tip: call failed
    pub const TIP_FAILED: &str =
        "Your water usage looks stable today. Remember: every drop counts!";

    /// Assistant: call failed
    pub const ASSISTANT_FAILED: &str =
        "I'm having trouble connecting to my central brain. Try checking your sensors directly!";

    /// Content advice: service answered with empty text
    pub const CONTENT_EMPTY: &str = "No suggestions available at this time.";
    /// Content advice: call failed
    pub const CONTENT_FAILED: &str =
        "Failed to generate AI advice. Please check your project details and try again.";
}

/// Retry policy constants
pub mod retry {
    /// Default maximum attempts per operation (first try included)
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 500;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECS: u64 = 10;

    /// Backoff multiplier
    pub const BACKOFF_FACTOR: f32 = 2.0;
}

/// HTTP/Network constants
pub mod network {
    /// Default per-attempt request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
}
