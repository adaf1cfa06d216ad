//! Configuration for embedding providers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_DIMENSION, DEFAULT_MODEL};

const DEFAULT_MAX_CHARS: usize = 2000;
const DEFAULT_BATCH_SIZE: usize = 256;

/// Configuration for the embedding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: ProviderKind,

    /// Sentence-transformer model name (fastembed only).
    pub model: String,

    /// Inputs longer than this many characters are truncated.
    pub max_chars: usize,

    /// Whether to L2-normalize output vectors.
    pub normalize: bool,

    /// Texts per inference batch.
    pub batch_size: usize,

    /// Where downloaded model files are kept. `None` uses fastembed's default.
    pub cache_dir: Option<PathBuf>,

    /// Vector length of the hashing provider.
    pub hashing_dimension: usize,
}

impl EmbeddingConfig {
    /// Select the provider.
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the directory used for model downloads.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::FastEmbed,
            model: DEFAULT_MODEL.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            normalize: true,
            batch_size: DEFAULT_BATCH_SIZE,
            cache_dir: None,
            hashing_dimension: DEFAULT_DIMENSION,
        }
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Local ONNX sentence-transformer.
    #[serde(alias = "fastembed")]
    FastEmbed,
    /// Deterministic feature hashing.
    Hashing,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastembed" | "fast_embed" => Ok(Self::FastEmbed),
            "hashing" | "hash" => Ok(Self::Hashing),
            other => Err(format!("unknown embedding provider '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_use_minilm() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, ProviderKind::FastEmbed);
        assert_eq!(config.model, "all-MiniLM-L6-v2");
        assert!(config.normalize);
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("hashing".parse::<ProviderKind>(), Ok(ProviderKind::Hashing));
        assert_eq!(
            "FastEmbed".parse::<ProviderKind>(),
            Ok(ProviderKind::FastEmbed)
        );
        assert!("openai".parse::<ProviderKind>().is_err());
    }
}
