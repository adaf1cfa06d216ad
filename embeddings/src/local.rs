//! Local sentence-transformer provider backed by `fastembed`.
//!
//! The ONNX model is downloaded and initialised on the first embedding call,
//! not at construction. Concurrent first calls share a single load.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::Embedding;
use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, Result};
use crate::provider::EmbeddingProvider;
use crate::similarity::normalize;

type ModelHandle = Arc<Mutex<TextEmbedding>>;

/// FastEmbed provider, `all-MiniLM-L6-v2` unless configured otherwise.
pub struct FastEmbedProvider {
    model: EmbeddingModel,
    model_name: String,
    dimension: usize,
    max_chars: usize,
    batch_size: usize,
    normalize: bool,
    cache_dir: Option<PathBuf>,
    handle: OnceCell<ModelHandle>,
}

impl FastEmbedProvider {
    /// Create a provider. Fails only if the model name is unknown.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let (model, dimension) = resolve_model(&config.model)?;
        Ok(Self {
            model,
            model_name: config.model.clone(),
            dimension,
            max_chars: config.max_chars.max(1),
            batch_size: config.batch_size.max(1),
            normalize: config.normalize,
            cache_dir: config.cache_dir.clone(),
            handle: OnceCell::new(),
        })
    }

    /// Whether the model weights are already in memory.
    pub fn is_loaded(&self) -> bool {
        self.handle.initialized()
    }

    async fn handle(&self) -> Result<ModelHandle> {
        let handle = self
            .handle
            .get_or_try_init(|| self.load())
            .await?;
        Ok(Arc::clone(handle))
    }

    async fn load(&self) -> Result<ModelHandle> {
        info!("Loading embedding model {}", self.model_name);
        let started = Instant::now();

        let mut options = InitOptions::new(self.model.clone()).with_show_download_progress(false);
        if let Some(dir) = &self.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let embedder = tokio::task::spawn_blocking(move || TextEmbedding::try_new(options))
            .await?
            .map_err(|e| EmbeddingError::ModelLoad {
                model: self.model_name.clone(),
                message: e.to_string(),
            })?;

        info!(
            "Embedding model {} ready in {}ms",
            self.model_name,
            started.elapsed().as_millis()
        );
        Ok(Arc::new(Mutex::new(embedder)))
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    fn name(&self) -> &str {
        "fastembed"
    }

    fn model(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let handle = self.handle().await?;
        let prepared: Vec<String> = texts
            .iter()
            .map(|text| truncate_to_chars(text, self.max_chars).into_owned())
            .collect();
        let batch_size = self.batch_size;

        debug!(
            "Generating {} embeddings with model {}",
            prepared.len(),
            self.model_name
        );

        let mut embeddings = tokio::task::spawn_blocking(move || {
            let mut model = handle.lock().map_err(|_| EmbeddingError::Poisoned)?;
            model
                .embed(prepared, Some(batch_size))
                .map_err(|e| EmbeddingError::Inference(e.to_string()))
        })
        .await??;

        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::BatchLength {
                expected: texts.len(),
                actual: embeddings.len(),
            });
        }

        if self.normalize {
            for embedding in embeddings.iter_mut() {
                normalize(embedding);
            }
        }

        Ok(embeddings)
    }
}

/// Map a sentence-transformers model name to its fastembed variant and dimension.
fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize)> {
    let normalized = name.trim().to_lowercase();
    let key = normalized
        .strip_prefix("sentence-transformers/")
        .or_else(|| normalized.strip_prefix("baai/"))
        .unwrap_or(&normalized);

    match key {
        "all-minilm-l6-v2" | "minilm" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "paraphrase-multilingual-minilm-l12-v2" => {
            Ok((EmbeddingModel::ParaphraseMLMiniLML12V2, 384))
        }
        _ => Err(EmbeddingError::UnsupportedModel(name.to_string())),
    }
}

fn truncate_to_chars(input: &str, max_chars: usize) -> Cow<'_, str> {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            debug!("Truncating embedding input to {max_chars} characters");
            Cow::Owned(input[..idx].to_string())
        }
        None => Cow::Borrowed(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_model_aliases() {
        assert_eq!(resolve_model("all-MiniLM-L6-v2").unwrap().1, 384);
        assert_eq!(
            resolve_model("sentence-transformers/all-MiniLM-L6-v2")
                .unwrap()
                .1,
            384
        );
        assert!(resolve_model("BAAI/bge-small-en-v1.5").is_ok());
        assert!(resolve_model("gpt-4").is_err());
    }

    #[test]
    fn test_new_does_not_load_model() {
        let provider = FastEmbedProvider::new(&EmbeddingConfig::default()).unwrap();
        assert!(!provider.is_loaded());
        assert_eq!(provider.model(), "all-MiniLM-L6-v2");
        assert_eq!(provider.dimension(), 384);
    }

    #[tokio::test]
    async fn test_empty_batch_skips_model_load() {
        let provider = FastEmbedProvider::new(&EmbeddingConfig::default()).unwrap();
        let vectors = provider.embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
        assert!(!provider.is_loaded());
    }

    #[test]
    fn test_truncate_to_chars() {
        assert_eq!(truncate_to_chars("hello", 10), "hello");
        assert_eq!(truncate_to_chars("hello", 3), "hel");
        assert_eq!(truncate_to_chars("éàüöß", 2), "éà");
    }
}
