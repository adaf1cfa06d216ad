//! `careerlens.toml` loading and command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use careerlens_embeddings::EmbeddingConfig;
use careerlens_narrative::NarrativeConfig;
use careerlens_ranking::RankingConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "careerlens.toml";

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Directory holding `competencies.json` and `jobs.json`.
    pub data_dir: PathBuf,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerLensConfig {
    pub catalog: CatalogSection,
    pub embedding: EmbeddingConfig,
    pub ranking: RankingConfig,
    pub narrative: NarrativeConfig,
}

impl CareerLensConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Set the catalog directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.catalog.data_dir = dir.into();
        self
    }
}
