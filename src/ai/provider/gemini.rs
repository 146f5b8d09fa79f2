//! Gemini API Provider
//!
//! Generation provider backed by the Gemini `generateContent` REST API.
//! Supports the web-grounded search tool and surfaces grounding chunks for
//! citation handling upstream.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    GenerationOptions, GenerationProvider, Generation, GroundingChunk, ProviderConfig,
    SharedCredentials,
};
use crate::types::{AquaError, ErrorClassifier, Result};

/// Gemini REST API provider
///
/// The API key is resolved through the injected credential resolver on every
/// request, never held by the provider itself.
pub struct GeminiProvider {
    api_base: String,
    model: String,
    credentials: SharedCredentials,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig, credentials: SharedCredentials) -> Result<Self> {
        let api_base = Self::validate_endpoint(&config.api_base)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                crate::constants::network::CONNECTION_TIMEOUT_SECS,
            ))
            .build()
            .map_err(|e| AquaError::GenerationApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base,
            model: config.model,
            credentials,
            client,
        })
    }

    /// Validate endpoint URL: http/https only, no trailing slash
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            AquaError::Config(format!("Invalid API endpoint URL '{}': {}", endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AquaError::Config(format!(
                "API endpoint must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if url.scheme() == "http"
            && let Some(host) = url.host_str()
            && !matches!(host, "localhost" | "127.0.0.1" | "::1")
        {
            warn!(
                "API endpoint uses plain http to a remote host: {}. Ensure this is intentional.",
                host
            );
        }

        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }

    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: options.max_output_tokens,
                temperature: options.temperature,
            },
            tools: options.search_grounding.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation> {
        info!(
            "Generating with Gemini (model: {}, max_output_tokens: {}, grounded: {})",
            self.model, options.max_output_tokens, options.search_grounding
        );

        let api_key = self.credentials.resolve()?;
        let request = self.build_request(prompt, options);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AquaError::GenerationApi(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AquaError::Generation(ErrorClassifier::classify_http_status(
                status,
                &format!("Gemini API error ({}): {}", status, body),
            )));
        }

        let response_body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AquaError::GenerationApi(format!("Failed to parse Gemini response: {}", e)))?;

        debug!("Received response from Gemini");
        Ok(response_body.into_generation())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Collapse the wire shape: first candidate's text parts joined, plus
    /// its grounding chunks in service order.
    fn into_generation(self) -> Generation {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Generation::default();
        };

        let text = candidate.content.map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        });
        let text = text.filter(|t| !t.is_empty());

        let grounding = candidate
            .grounding_metadata
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .map(|chunk| {
                        let web = chunk.web.unwrap_or_default();
                        GroundingChunk {
                            uri: web.uri,
                            title: web.title,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Generation { text, grounding }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct WireGroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize, Default)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::StaticCredentials;

    fn test_provider() -> GeminiProvider {
        GeminiProvider::new(ProviderConfig::default(), StaticCredentials::shared("k"))
            .expect("default config is valid")
    }

    #[test]
    fn test_validate_endpoint_rejects_bad_scheme() {
        let err = GeminiProvider::validate_endpoint("ftp://example.com");
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_endpoint_strips_trailing_slash() {
        let base = GeminiProvider::validate_endpoint("https://example.com/").unwrap();
        assert_eq!(base, "https://example.com");
    }

    #[test]
    fn test_build_request_grounded() {
        let provider = test_provider();
        let options = GenerationOptions::new(300).with_search_grounding();
        let request = provider.build_request("question", &options);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "question");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 300);
        assert!(json["generationConfig"].get("temperature").is_none());
        assert!(json["tools"][0].get("google_search").is_some());
    }

    #[test]
    fn test_build_request_with_temperature_no_tools() {
        let provider = test_provider();
        let options = GenerationOptions::new(150).with_temperature(0.8);
        let request = provider.build_request("tip please", &options);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["temperature"], 0.8);
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_into_generation_text_and_grounding() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Answer " }, { "text": "text" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example", "title": "A" } },
                        { "web": {} },
                        { "web": { "uri": "https://b.example" } }
                    ]
                }
            }]
        }))
        .unwrap();

        let generation = body.into_generation();
        assert_eq!(generation.text.as_deref(), Some("Answer text"));
        assert_eq!(generation.grounding.len(), 3);
        assert_eq!(generation.grounding[0].uri.as_deref(), Some("https://a.example"));
        assert_eq!(generation.grounding[1].uri, None);
        assert_eq!(generation.grounding[2].title, None);
    }

    #[test]
    fn test_into_generation_empty_candidates() {
        let body: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        let generation = body.into_generation();
        assert_eq!(generation.text, None);
        assert!(generation.grounding.is_empty());
    }

    #[test]
    fn test_into_generation_empty_text_is_none() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
        }))
        .unwrap();
        assert_eq!(body.into_generation().text, None);
    }
}
