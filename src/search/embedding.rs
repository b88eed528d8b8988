//! Embedding client.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout for embedding calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the `OpenAI` embeddings endpoint.
///
/// Only the resulting float vector is consumed; one query needs exactly one
/// embedding of its enriched text.
pub struct EmbeddingClient {
    /// API key.
    api_key: Option<String>,
    /// API endpoint.
    endpoint: String,
    /// Embedding model to use.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl EmbeddingClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.openai.com/v1";

    /// Default embedding model.
    pub const DEFAULT_MODEL: &'static str = "text-embedding-3-large";

    /// Creates a new embedding client.
    ///
    /// The API key is taken from `OPENAI_API_KEY` unless overridden with
    /// [`Self::with_api_key`].
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::UpstreamRequest {
                operation: "embedding_client_init".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            client,
        })
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Validates that the client is configured.
    fn validate(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(Error::Configuration("OPENAI_API_KEY not set".to_string()));
        }
        Ok(())
    }

    /// Computes the embedding vector for a text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no API key is set and
    /// [`Error::UpstreamRequest`] when the request fails or the response
    /// carries no embedding. Failures abort the query; there is no retry.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.validate()?;

        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.endpoint))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| Error::UpstreamRequest {
                operation: "embedding".to_string(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::UpstreamRequest {
                operation: "embedding".to_string(),
                cause: format!("API returned status: {status} - {body}"),
            });
        }

        let response: EmbeddingResponse =
            response.json().map_err(|e| Error::UpstreamRequest {
                operation: "embedding_response".to_string(),
                cause: e.to_string(),
            })?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::UpstreamRequest {
                operation: "embedding_response".to_string(),
                cause: "no embedding in response".to_string(),
            })
    }
}

/// Embeddings API request body.
#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

/// Embeddings API response body.
#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

/// A single embedding in the response.
#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
