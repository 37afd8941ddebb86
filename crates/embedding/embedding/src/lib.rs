//! # Text Embeddings
//!
//! This crate defines the embedding service interface used by the probe: a liveness check
//! against the service and single-text embedding generation.

use async_trait::async_trait;

mod error;
pub use error::EmbeddingError;

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Checks that the service is up and answering with `200 OK`.
    async fn check_health(&self) -> Result<(), EmbeddingError>;

    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
