//! Embedding providers.
//!
//! A provider maps text to fixed-length vectors. Providers are shared behind
//! `Arc` and must be safe to call from several tasks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Embedding;
use crate::config::{EmbeddingConfig, ProviderKind};
use crate::error::{EmbeddingError, Result};
use crate::hashing::HashingProvider;
use crate::local::FastEmbedProvider;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the model identifier.
    fn model(&self) -> &str;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::BatchLength {
                expected: 1,
                actual: vectors.len(),
            });
        }
        vectors.pop().ok_or(EmbeddingError::BatchLength {
            expected: 1,
            actual: 0,
        })
    }
}

/// Build the provider selected by `config`.
///
/// Construction is cheap; model weights are only loaded on first use.
pub fn build_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        ProviderKind::FastEmbed => Arc::new(FastEmbedProvider::new(config)?),
        ProviderKind::Hashing => Arc::new(HashingProvider::new(config.hashing_dimension)),
    };
    Ok(provider)
}
