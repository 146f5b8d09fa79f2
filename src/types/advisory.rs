//! Advisory Domain Types
//!
//! Request/response shapes crossing the advisory client boundary, plus the
//! `Advice` outcome type. `Advice` keeps the two degraded paths (empty
//! response, failed call) distinguishable from real generated text while
//! still flattening to a display-ready string for the presentation layer.

use serde::{Deserialize, Serialize};

/// A typed advisory request, one variant per client operation.
///
/// Callers are responsible for providing non-empty text fields; the client
/// forwards them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvisoryRequest {
    /// One short conservation tip based on recent usage activity
    Tip { usage_history_summary: String },
    /// Conversational question with the user's current daily usage
    Assistant {
        user_query: String,
        current_usage_liters: f64,
    },
    /// Listing-copy improvement advice for a published project
    ContentAdvice { title: String, description: String },
}

impl AdvisoryRequest {
    /// Operation name for logging
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Tip { .. } => "tip",
            Self::Assistant { .. } => "assistant",
            Self::ContentAdvice { .. } => "content_advice",
        }
    }
}

/// A citation extracted from the service's grounding metadata.
///
/// Values are copied out of the service payload; nothing references back
/// into the raw response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

impl Citation {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.uri)
    }
}

/// Generated text plus any citations that backed it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvisoryResponse {
    pub text: String,
    /// Empty unless the call requested search grounding and the service
    /// returned chunks with a resolvable web URI
    pub citations: Vec<Citation>,
}

impl AdvisoryResponse {
    /// Flatten text and citations into a single display string.
    ///
    /// Citations are appended as a `Sources used:` section, one line each,
    /// in service order. No section is added when there are no citations.
    pub fn flatten(&self) -> String {
        if self.citations.is_empty() {
            return self.text.clone();
        }

        let mut out = self.text.clone();
        out.push_str("\n\nSources used:");
        for citation in &self.citations {
            out.push_str(&format!("\n- {}", citation));
        }
        out
    }
}

/// Why an operation fell back to canned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The service answered but the text field was empty or absent
    EmptyResponse,
    /// The call itself failed (network, service error, malformed response)
    GenerationFailed,
}

/// Outcome of an advisory operation.
///
/// The presentation layer only needs `into_text()`, which always yields a
/// renderable string. Tests and instrumented callers can assert on which
/// path produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Advice {
    /// Text produced by the generation service
    Generated(String),
    /// Operation-specific canned text standing in for a degraded call
    Fallback {
        text: &'static str,
        reason: FallbackReason,
    },
}

impl Advice {
    pub fn fallback(text: &'static str, reason: FallbackReason) -> Self {
        Self::Fallback { text, reason }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The display string, regardless of which path produced it
    pub fn as_text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Fallback { text, .. } => text,
        }
    }

    /// Consume into the display string
    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::Fallback { text, .. } => text.to_string(),
        }
    }
}
