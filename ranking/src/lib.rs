//! # Ranking
//!
//! Ranks the catalog against a free-text profile.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       ProfileMatcher                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │   profile text ──► embed ──► cosine vs catalog ──► competency    │
//! │                                   ▲                  scores      │
//! │                                   │                    │         │
//! │                     CatalogEmbeddings (computed once)  │         │
//! │                                                        ▼         │
//! │                              mean over required ids ──► job      │
//! │                                                        scores    │
//! │                                                        │         │
//! │                                   stable top-K ◄───────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use careerlens_ranking::ProfileMatcher;
//!
//! let matcher = ProfileMatcher::builder()
//!     .with_data_dir("data")
//!     .with_provider(provider)
//!     .build()
//!     .await?;
//!
//! let analysis = matcher.analyze("Data engineering student, Python and Kafka", 5, 3).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod rank;
pub mod scored;

pub use config::RankingConfig;
pub use engine::{ProfileMatcher, ProfileMatcherBuilder};
pub use error::{RankingError, Result};
pub use rank::{job_score, top_k};
pub use scored::{ProfileAnalysis, Scored, ScoredCompetency, ScoredJob};

// Re-export from dependencies for convenience
pub use careerlens_catalog::{Catalog, Competency, Job};
pub use careerlens_embeddings::{EmbeddingProvider, HashingProvider};
