//! Error types for profile ranking.

use thiserror::Error;

/// Result type alias for ranking operations.
pub type Result<T> = std::result::Result<T, RankingError>;

/// Errors that can occur while ranking a profile.
#[derive(Error, Debug)]
pub enum RankingError {
    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] careerlens_embeddings::EmbeddingError),

    /// Catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] careerlens_catalog::CatalogError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
