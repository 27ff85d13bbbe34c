//! OpenAI embeddings API provider.
//!
//! Calls `POST /v1/embeddings` with `text-embedding-3-small` (1536
//! dimensions). The endpoint accepts an array input, so `embed_batch` is a
//! single HTTP call regardless of batch size. Vectors are re-ordered by
//! the response `index` field rather than trusting response order.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use storefind_core::provider::EmbeddingProvider;
use storefind_types::error::EmbedError;

/// Output dimension of text-embedding-3-small.
pub const OPENAI_EMBEDDING_DIMENSION: usize = 1536;

/// Model identifier sent with every request.
pub const OPENAI_MODEL_NAME: &str = "text-embedding-3-small";

/// Request body for the OpenAI embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Response body from the OpenAI embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingObject>,
}

/// One embedding in the response, tagged with its input position.
#[derive(Debug, Deserialize)]
struct EmbeddingObject {
    index: usize,
    embedding: Vec<f32>,
}

/// Re-assemble response vectors into input order via the index field.
fn into_ordered_vectors(
    mut data: Vec<EmbeddingObject>,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbedError> {
    if data.len() != expected {
        return Err(EmbedError::Provider {
            message: format!("API returned {} embeddings for {} inputs", data.len(), expected),
        });
    }
    data.sort_by_key(|obj| obj.index);
    Ok(data.into_iter().map(|obj| obj.embedding).collect())
}

/// Remote embedding provider for the OpenAI API.
// Intentionally no Debug derive: the SecretString field keeps the API key
// out of Debug output, and omitting Debug entirely avoids leaking the rest
// of the client state.
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiEmbeddingProvider {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.openai.com".to_string(),
        }
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn request_embeddings(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let body = EmbeddingRequest {
            model: OPENAI_MODEL_NAME,
            input: inputs,
        };
        let url = format!("{}/v1/embeddings", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbedError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => EmbedError::AuthenticationFailed,
                429 => EmbedError::RateLimited,
                _ => EmbedError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            EmbedError::Provider {
                message: format!("failed to parse response: {e}"),
            }
        })?;

        into_ordered_vectors(parsed.data, inputs.len())
    }
}

impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let inputs = [text.to_string()];
        let mut vectors = self.request_embeddings(&inputs).await?;
        vectors.pop().ok_or_else(|| EmbedError::Provider {
            message: "API returned no embedding".to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn model_name(&self) -> &str {
        OPENAI_MODEL_NAME
    }

    fn dimension(&self) -> usize {
        OPENAI_EMBEDDING_DIMENSION
    }
}
