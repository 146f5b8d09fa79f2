//! Advisory Client
//!
//! Stateless façade over the generation provider. Each operation builds a
//! fixed-template prompt, applies its generation profile, and normalizes
//! every failure into the operation's canned fallback text. Callers never
//! see an error; instrumented callers and tests can still distinguish the
//! taken path through [`Advice`].

use tracing::{debug, error, info};

use super::prompt;
use super::provider::{GenerationOptions, GroundingChunk, SharedProvider};
use super::retry::RetryPolicy;
use super::timeout::{TimeoutConfig, with_timeout};
use crate::constants::{fallbacks, profiles};
use crate::types::{
    Advice, AdvisoryRequest, AdvisoryResponse, Citation, FallbackReason, Result,
};

/// Default title for grounding chunks that carry a URI but no title
const DEFAULT_CITATION_TITLE: &str = "Source";

/// The advisory client
///
/// Holds no per-call state; concurrent calls are independent. Provider,
/// timeout, and retry policy are fixed at construction.
#[derive(Clone)]
pub struct AdvisoryClient {
    provider: SharedProvider,
    timeout: TimeoutConfig,
    retry: RetryPolicy,
}

impl AdvisoryClient {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            provider,
            timeout: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Dispatch a typed request to the matching operation
    pub async fn advise(&self, request: &AdvisoryRequest) -> Advice {
        match request {
            AdvisoryRequest::Tip {
                usage_history_summary,
            } => self.generate_usage_tip(usage_history_summary).await,
            AdvisoryRequest::Assistant {
                user_query,
                current_usage_liters,
            } => self.ask_assistant(user_query, *current_usage_liters).await,
            AdvisoryRequest::ContentAdvice { title, description } => {
                self.generate_content_advice(title, description).await
            }
        }
    }

    /// One short, encouraging conservation tip based on recent usage
    pub async fn generate_usage_tip(&self, usage_history_summary: &str) -> Advice {
        let options = GenerationOptions::new(profiles::TIP_MAX_OUTPUT_TOKENS)
            .with_temperature(profiles::TIP_TEMPERATURE);

        match self
            .call("usage tip", prompt::usage_tip(usage_history_summary), options)
            .await
        {
            Ok(Some(text)) => Advice::Generated(text),
            Ok(None) => {
                debug!("usage tip came back empty, using canned tip");
                Advice::fallback(fallbacks::TIP_EMPTY, FallbackReason::EmptyResponse)
            }
            Err(err) => {
                error!("usage tip generation failed: {}", err);
                Advice::fallback(fallbacks::TIP_FAILED, FallbackReason::GenerationFailed)
            }
        }
    }

    /// Grounded conversational answer with flattened citations
    pub async fn ask_assistant(&self, user_query: &str, current_usage_liters: f64) -> Advice {
        let options = GenerationOptions::new(profiles::ASSISTANT_MAX_OUTPUT_TOKENS)
            .with_search_grounding();
        let prompt = prompt::assistant(user_query, current_usage_liters);

        let outcome = self
            .retry
            .run("assistant", || {
                with_timeout(
                    self.timeout.generation_request,
                    self.provider.generate(&prompt, &options),
                    "assistant",
                )
            })
            .await;

        match outcome {
            Ok(generation) => {
                let response = AdvisoryResponse {
                    text: generation.text.unwrap_or_default(),
                    citations: citations_from(generation.grounding),
                };
                if !response.citations.is_empty() {
                    info!("assistant answer grounded in {} source(s)", response.citations.len());
                }
                Advice::Generated(response.flatten())
            }
            Err(err) => {
                error!("assistant call failed: {}", err);
                Advice::fallback(fallbacks::ASSISTANT_FAILED, FallbackReason::GenerationFailed)
            }
        }
    }

    /// Listing-copy improvement advice for a published project
    pub async fn generate_content_advice(&self, title: &str, description: &str) -> Advice {
        let options = GenerationOptions::new(profiles::CONTENT_MAX_OUTPUT_TOKENS)
            .with_temperature(profiles::CONTENT_TEMPERATURE);

        match self
            .call(
                "content advice",
                prompt::content_advice(title, description),
                options,
            )
            .await
        {
            Ok(Some(text)) => Advice::Generated(text),
            Ok(None) => {
                debug!("content advice came back empty");
                Advice::fallback(fallbacks::CONTENT_EMPTY, FallbackReason::EmptyResponse)
            }
            Err(err) => {
                error!("content advice generation failed: {}", err);
                Advice::fallback(fallbacks::CONTENT_FAILED, FallbackReason::GenerationFailed)
            }
        }
    }

    /// Ungrounded call path shared by tip and content advice: retries with
    /// a per-attempt timeout, collapses the result to its text field.
    async fn call(
        &self,
        operation: &str,
        prompt: String,
        options: GenerationOptions,
    ) -> Result<Option<String>> {
        let generation = self
            .retry
            .run(operation, || {
                with_timeout(
                    self.timeout.generation_request,
                    self.provider.generate(&prompt, &options),
                    operation,
                )
            })
            .await?;
        Ok(generation.text.filter(|t| !t.is_empty()))
    }
}

/// Copy qualifying grounding chunks into citations.
///
/// Chunks without a URI are dropped; order is preserved; a missing title
/// falls back to `"Source"`.
fn citations_from(grounding: Vec<GroundingChunk>) -> Vec<Citation> {
    grounding
        .into_iter()
        .filter_map(|chunk| {
            let uri = chunk.uri?;
            Some(Citation {
                title: chunk.title.unwrap_or_else(|| DEFAULT_CITATION_TITLE.to_string()),
                uri,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{Generation, GenerationProvider};
    use crate::types::{AquaError, ErrorCategory, GenerationError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Deterministic stub returning a fixed generation
    struct StubProvider {
        generation: Generation,
        /// Records (prompt, options) per call
        calls: Mutex<Vec<(String, GenerationOptions)>>,
    }

    impl StubProvider {
        fn new(generation: Generation) -> Arc<Self> {
            Arc::new(Self {
                generation,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<(String, GenerationOptions)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationProvider for StubProvider {
        async fn generate(
            &self,
            prompt: &str,
            options: &GenerationOptions,
        ) -> crate::types::Result<Generation> {
            self.calls.lock().unwrap().push((prompt.to_string(), *options));
            Ok(self.generation.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    /// Stub that always fails with a non-retryable error
    struct FailingProvider;

    #[async_trait]
    impl GenerationProvider for FailingProvider {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> crate::types::Result<Generation> {
            Err(AquaError::Generation(GenerationError::new(
                ErrorCategory::Auth,
                "no key",
            )))
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn model(&self) -> &str {
            "failing-model"
        }
    }

    fn client_with(provider: Arc<dyn GenerationProvider + Send + Sync>) -> AdvisoryClient {
        AdvisoryClient::new(provider).with_retry(RetryPolicy::none())
    }

    #[tokio::test]
    async fn test_tip_returns_generated_text_verbatim() {
        let stub = StubProvider::new(Generation::from_text("Try a 4-minute shower."));
        let client = client_with(stub.clone());

        let advice = client
            .generate_usage_tip("Daily usage is 15L, spiked on Thursday")
            .await;
        assert_eq!(advice, Advice::Generated("Try a 4-minute shower.".to_string()));

        let calls = stub.recorded();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("Daily usage is 15L, spiked on Thursday"));
        assert_eq!(calls[0].1.max_output_tokens, 150);
        assert_eq!(calls[0].1.temperature, Some(0.8));
        assert!(!calls[0].1.search_grounding);
    }

    #[tokio::test]
    async fn test_tip_empty_text_fallback() {
        let stub = StubProvider::new(Generation::default());
        let advice = client_with(stub).generate_usage_tip("summary").await;
        assert_eq!(
            advice,
            Advice::fallback(
                "Keep up the great work saving water!",
                FallbackReason::EmptyResponse
            )
        );
    }

    #[tokio::test]
    async fn test_tip_failure_fallback() {
        let advice = client_with(Arc::new(FailingProvider))
            .generate_usage_tip("summary")
            .await;
        assert_eq!(
            advice,
            Advice::fallback(
                "Your water usage looks stable today. Remember: every drop counts!",
                FallbackReason::GenerationFailed
            )
        );
    }

    #[tokio::test]
    async fn test_assistant_appends_qualifying_sources() {
        let stub = StubProvider::new(Generation {
            text: Some("Base answer".to_string()),
            grounding: vec![
                GroundingChunk {
                    uri: Some("https://a.example".to_string()),
                    title: Some("A".to_string()),
                },
                GroundingChunk::default(),
                GroundingChunk {
                    uri: Some("https://b.example".to_string()),
                    title: None,
                },
            ],
        });
        let client = client_with(stub.clone());

        let advice = client.ask_assistant("How am I doing?", 120.0).await;
        assert_eq!(
            advice.as_text(),
            "Base answer\n\nSources used:\n- A: https://a.example\n- Source: https://b.example"
        );

        let calls = stub.recorded();
        assert_eq!(calls[0].1.max_output_tokens, 300);
        assert_eq!(calls[0].1.temperature, None);
        assert!(calls[0].1.search_grounding);
        assert!(calls[0].0.contains("\"How am I doing?\""));
        assert!(calls[0].0.contains("120 Liters"));
    }

    #[tokio::test]
    async fn test_assistant_no_sources_section_without_grounding() {
        let stub = StubProvider::new(Generation::from_text("Just an answer"));
        let advice = client_with(stub).ask_assistant("q", 10.0).await;
        assert_eq!(advice.as_text(), "Just an answer");
    }

    #[tokio::test]
    async fn test_assistant_all_chunks_without_uri_are_excluded() {
        let stub = StubProvider::new(Generation {
            text: Some("Answer".to_string()),
            grounding: vec![GroundingChunk::default(), GroundingChunk::default()],
        });
        let advice = client_with(stub).ask_assistant("q", 10.0).await;
        assert_eq!(advice.as_text(), "Answer");
    }

    #[tokio::test]
    async fn test_assistant_empty_text_stays_generated() {
        // The assistant passes empty text through rather than substituting
        // canned text; only a failed call falls back.
        let stub = StubProvider::new(Generation::default());
        let advice = client_with(stub).ask_assistant("q", 10.0).await;
        assert_eq!(advice, Advice::Generated(String::new()));
    }

    #[tokio::test]
    async fn test_assistant_failure_fallback() {
        let advice = client_with(Arc::new(FailingProvider))
            .ask_assistant("q", 10.0)
            .await;
        assert_eq!(
            advice,
            Advice::fallback(
                "I'm having trouble connecting to my central brain. Try checking your sensors directly!",
                FallbackReason::GenerationFailed
            )
        );
    }

    #[tokio::test]
    async fn test_content_advice_empty_text_fallback() {
        let stub = StubProvider::new(Generation {
            text: Some(String::new()),
            grounding: vec![],
        });
        let advice = client_with(stub)
            .generate_content_advice("Lumina Vision", "A photo editor")
            .await;
        assert_eq!(
            advice,
            Advice::fallback(
                "No suggestions available at this time.",
                FallbackReason::EmptyResponse
            )
        );
    }

    #[tokio::test]
    async fn test_content_advice_profile_and_prompt() {
        let stub = StubProvider::new(Generation::from_text("Tighten the headline."));
        let client = client_with(stub.clone());

        let advice = client
            .generate_content_advice("Lumina Vision", "A photo editor")
            .await;
        assert_eq!(advice.as_text(), "Tighten the headline.");

        let calls = stub.recorded();
        assert_eq!(calls[0].1.max_output_tokens, 500);
        assert_eq!(calls[0].1.temperature, Some(0.7));
        assert!(!calls[0].1.search_grounding);
    }

    #[tokio::test]
    async fn test_content_advice_failure_fallback() {
        let advice = client_with(Arc::new(FailingProvider))
            .generate_content_advice("t", "d")
            .await;
        assert_eq!(
            advice,
            Advice::fallback(
                "Failed to generate AI advice. Please check your project details and try again.",
                FallbackReason::GenerationFailed
            )
        );
    }

    /// Stub that never answers within a test-sized timeout
    struct SlowProvider;

    #[async_trait]
    impl GenerationProvider for SlowProvider {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> crate::types::Result<Generation> {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Ok(Generation::from_text("too late"))
        }

        fn name(&self) -> &str {
            "slow"
        }

        fn model(&self) -> &str {
            "slow-model"
        }
    }

    #[tokio::test]
    async fn test_timeout_lands_on_failure_fallback() {
        let timeout = crate::ai::TimeoutConfig {
            generation_request: std::time::Duration::from_millis(10),
            connection: std::time::Duration::from_millis(10),
        };
        let client = AdvisoryClient::new(Arc::new(SlowProvider))
            .with_timeout(timeout)
            .with_retry(RetryPolicy::none());

        let advice = client.generate_usage_tip("summary").await;
        assert_eq!(
            advice,
            Advice::fallback(
                "Your water usage looks stable today. Remember: every drop counts!",
                FallbackReason::GenerationFailed
            )
        );
    }

    #[tokio::test]
    async fn test_idempotence_against_deterministic_stub() {
        let stub = StubProvider::new(Generation::from_text("Same tip."));
        let client = client_with(stub);

        let first = client.generate_usage_tip("summary").await;
        let second = client.generate_usage_tip("summary").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_advise_dispatches_by_variant() {
        let stub = StubProvider::new(Generation::from_text("dispatched"));
        let client = client_with(stub.clone());

        let request = AdvisoryRequest::ContentAdvice {
            title: "T".to_string(),
            description: "D".to_string(),
        };
        let advice = client.advise(&request).await;
        assert_eq!(advice.as_text(), "dispatched");
        assert_eq!(stub.recorded()[0].1.max_output_tokens, 500);
    }

    #[test]
    fn test_citations_from_filters_and_defaults() {
        let citations = citations_from(vec![
            GroundingChunk {
                uri: Some("https://a.example".to_string()),
                title: Some("A".to_string()),
            },
            GroundingChunk {
                uri: None,
                title: Some("orphan title".to_string()),
            },
            GroundingChunk {
                uri: Some("https://b.example".to_string()),
                title: None,
            },
        ]);

        assert_eq!(
            citations,
            vec![
                Citation::new("A", "https://a.example"),
                Citation::new("Source", "https://b.example"),
            ]
        );
    }
}
