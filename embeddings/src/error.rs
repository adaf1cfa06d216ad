//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Model name not recognised by the configured provider.
    #[error("unsupported embedding model: {0}")]
    UnsupportedModel(String),

    /// Model files could not be fetched or initialised.
    #[error("failed to load embedding model {model}: {message}")]
    ModelLoad { model: String, message: String },

    /// Inference failed inside the model runtime.
    #[error("embedding inference failed: {0}")]
    Inference(String),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Provider returned a different number of vectors than it was given texts.
    #[error("provider returned {actual} embeddings for {expected} texts")]
    BatchLength { expected: usize, actual: usize },

    /// The blocking inference task panicked or was cancelled.
    #[error("embedding worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// A previous inference panicked while holding the model.
    #[error("embedding model lock poisoned")]
    Poisoned,
}
