//! # Ollama Embedding Service
//!
//! This crate provides an implementation of the `EmbeddingService` trait for services that speak
//! the Ollama HTTP API (a single Ollama instance, or a load balancer fronting several).
//!
//! ## Endpoints
//!
//! - `GET {base}/api/tags`: model listing, used as the liveness check.
//! - `POST {base}/api/embeddings` with `{"model": ..., "prompt": ...}`: returns `{"embedding": [...]}`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedding::EmbeddingService;
//! use ollama_embedding::OllamaEmbedding;
//!
//! async fn example() -> Result<(), embedding::EmbeddingError> {
//!     let service = OllamaEmbedding::new("http://localhost:11000");
//!     service.check_health().await?;
//!     let embedding = service.embed("Hello world").await?;
//!     println!("Embedding dimension: {}", embedding.len());
//!     Ok(())
//! }
//! ```
//!
//! Requests are never retried. Timeouts are fixed per request: [`HEALTH_TIMEOUT`] for the
//! liveness check and [`EMBED_TIMEOUT`] for every embedding call.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use embedding::{EmbeddingError, EmbeddingService};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "nomic-embed-text";
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const EMBED_TIMEOUT: Duration = Duration::from_secs(30);

const TAGS_PATH: &str = "/api/tags";
const EMBEDDINGS_PATH: &str = "/api/embeddings";

/// Ollama embedding service implementation.
#[derive(Debug, Clone)]
pub struct OllamaEmbedding {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedding {
    /// Creates a client for the service rooted at `base_url`, using [`DEFAULT_MODEL`].
    ///
    /// A trailing `/` on `base_url` is dropped so endpoint paths join cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Sets a different embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Returns the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

/// Flattens a reqwest error and its sources into one line, e.g.
/// `error sending request for url (...): client error (Connect): tcp connect error: Connection refused`.
fn transport_error(err: reqwest::Error) -> EmbeddingError {
    let mut message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    EmbeddingError::transport(message)
}

/// Turns anything but `200 OK` into [`EmbeddingError::Status`], keeping the body for diagnostics.
/// Other 2xx codes (201, 202, 204) are failures too.
async fn ensure_ok(response: Response) -> Result<Response, EmbeddingError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EmbeddingError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Parses an embeddings reply. A missing `embedding` field or an undecodable body yields an
/// empty vector rather than an error.
fn parse_embedding(body: &[u8]) -> Vec<f32> {
    match serde_json::from_slice::<EmbeddingResponse>(body) {
        Ok(parsed) => parsed.embedding,
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "embeddings reply is not an embedding payload");
            Vec::new()
        }
    }
}

#[async_trait]
impl EmbeddingService for OllamaEmbedding {
    /// Sends `GET /api/tags` with [`HEALTH_TIMEOUT`]; only `200 OK` counts as alive.
    async fn check_health(&self) -> Result<(), EmbeddingError> {
        let url = self.url(TAGS_PATH);
        debug!(url = %url, "step: liveness request");

        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        ensure_ok(response).await?;

        info!(url = %url, status = status.as_u16(), "step: liveness ok");
        Ok(())
    }

    /// Sends `POST /api/embeddings` with [`EMBED_TIMEOUT`] and returns the `embedding` field.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(
            model = %self.model,
            text_len = text.len(),
            "step: embed request"
        );

        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(self.url(EMBEDDINGS_PATH))
            .json(&request)
            .timeout(EMBED_TIMEOUT)
            .send()
            .await
            .map_err(transport_error)?;
        let response = ensure_ok(response).await?;
        let body = response.bytes().await.map_err(transport_error)?;

        let embedding = parse_embedding(&body);
        info!(dimension = embedding.len(), "step: embed done");
        Ok(embedding)
    }
}

#[cfg(test)]
mod ollama_embedding_test;
