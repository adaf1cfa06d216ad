//! Process-lifetime cache for catalog embeddings.

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::info;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::provider::EmbeddingProvider;

#[derive(Debug)]
struct CachedVectors {
    model: String,
    vectors: Vec<Embedding>,
}

/// Embeddings of a fixed, ordered text list, computed once.
///
/// The first [`get_or_init`](Self::get_or_init) call embeds the texts; every
/// later call returns the same vectors without touching the provider. Callers
/// racing on a cold cache wait for a single computation. A failed computation
/// leaves the cache cold so the next call retries.
#[derive(Debug, Default)]
pub struct CatalogEmbeddings {
    cell: OnceCell<CachedVectors>,
}

impl CatalogEmbeddings {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached vectors, computing them with `provider` on first use.
    pub async fn get_or_init(
        &self,
        provider: &dyn EmbeddingProvider,
        texts: &[String],
    ) -> Result<&[Embedding]> {
        let cached = self
            .cell
            .get_or_try_init(|| async {
                info!(
                    "Embedding {} catalog entries with {}",
                    texts.len(),
                    provider.model()
                );
                let vectors = provider.embed_batch(texts).await?;
                if vectors.len() != texts.len() {
                    return Err(EmbeddingError::BatchLength {
                        expected: texts.len(),
                        actual: vectors.len(),
                    });
                }
                Ok::<_, EmbeddingError>(CachedVectors {
                    model: provider.model().to_string(),
                    vectors,
                })
            })
            .await?;
        Ok(&cached.vectors)
    }

    /// The cached vectors, if already computed.
    pub fn get(&self) -> Option<&[Embedding]> {
        self.cell.get().map(|cached| cached.vectors.as_slice())
    }

    /// Whether the vectors have been computed.
    pub fn is_warm(&self) -> bool {
        self.cell.initialized()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        match self.cell.get() {
            Some(cached) => CacheStats {
                entries: cached.vectors.len(),
                dimension: cached.vectors.first().map(Vec::len),
                model: Some(cached.model.clone()),
            },
            None => CacheStats::default(),
        }
    }
}

/// Statistics about the catalog embedding cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cached vectors.
    pub entries: usize,

    /// Vector length, when at least one vector is cached.
    pub dimension: Option<usize>,

    /// Model that produced the vectors.
    pub model: Option<String>,
}
