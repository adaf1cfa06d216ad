//! # Embeddings
//!
//! This crate turns free text into dense vectors and scores them against a
//! fixed catalog for CareerLens profile matching.
//!
//! ## Features
//!
//! - **Embedding Generation**: Local sentence-transformer models through `fastembed`
//! - **Offline Provider**: Deterministic feature hashing, no model download
//! - **Scoring**: Cosine similarity of one query against many catalog vectors
//! - **Caching**: Catalog vectors are computed once per process
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► score_all                 │
//! │       │                    │                                    │
//! │       ▼                    ▼                                    │
//! │  FastEmbed/Hashing   CatalogEmbeddings                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod hashing;
pub mod local;
pub mod provider;
pub mod similarity;

pub use cache::{CacheStats, CatalogEmbeddings};
pub use config::{EmbeddingConfig, ProviderKind};
pub use error::{EmbeddingError, Result};
pub use hashing::HashingProvider;
pub use local::FastEmbedProvider;
pub use provider::{EmbeddingProvider, build_provider};
pub use similarity::{cosine_similarity, normalize, score_all};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Name of the sentence-embedding model used when none is configured.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Dimension of embeddings produced by [`DEFAULT_MODEL`].
pub const DEFAULT_DIMENSION: usize = 384;
