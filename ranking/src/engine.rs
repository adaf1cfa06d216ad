//! Profile matching engine.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use careerlens_catalog::Catalog;
use careerlens_embeddings::{
    CacheStats, CatalogEmbeddings, Embedding, EmbeddingProvider, score_all,
};
use tracing::{debug, info};

use crate::config::RankingConfig;
use crate::error::{RankingError, Result};
use crate::rank::{job_score, top_k};
use crate::scored::{ProfileAnalysis, ScoredCompetency, ScoredJob};

/// Ranks a fixed catalog against free-text profiles.
///
/// Built once at startup and shared by reference. It owns:
/// - the read-only catalog
/// - the embedding provider (model loaded lazily by the provider)
/// - the catalog embedding cache, filled on the first request or by [`warm_up`](Self::warm_up)
///
/// The profile text is embedded on every call; catalog vectors are never
/// recomputed.
pub struct ProfileMatcher {
    /// Configuration.
    config: RankingConfig,

    /// Competencies and jobs.
    catalog: Arc<Catalog>,

    /// Text encoder.
    provider: Arc<dyn EmbeddingProvider>,

    /// Competency description vectors, aligned with the catalog.
    catalog_embeddings: CatalogEmbeddings,

    /// Competency descriptions, aligned with the catalog.
    competency_texts: Vec<String>,
}

impl ProfileMatcher {
    /// Create a new profile matcher builder.
    pub fn builder() -> ProfileMatcherBuilder {
        ProfileMatcherBuilder::new()
    }

    /// Create a matcher over `catalog` using `provider`.
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(catalog, provider, RankingConfig::default())
    }

    /// Create a matcher with explicit defaults for `k`.
    pub fn with_config(
        catalog: Arc<Catalog>,
        provider: Arc<dyn EmbeddingProvider>,
        config: RankingConfig,
    ) -> Self {
        let competency_texts = catalog.competency_texts();
        Self {
            config,
            catalog,
            provider,
            catalog_embeddings: CatalogEmbeddings::new(),
            competency_texts,
        }
    }

    /// The catalog being ranked.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The ranking configuration.
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Compute the catalog embeddings now instead of on the first request.
    pub async fn warm_up(&self) -> Result<()> {
        self.catalog_vectors().await?;
        info!("Catalog embeddings ready: {:?}", self.catalog_embeddings.stats());
        Ok(())
    }

    /// Whether the catalog embeddings have been computed.
    pub fn is_warm(&self) -> bool {
        self.catalog_embeddings.is_warm()
    }

    /// Statistics of the catalog embedding cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.catalog_embeddings.stats()
    }

    async fn catalog_vectors(&self) -> Result<&[Embedding]> {
        Ok(self
            .catalog_embeddings
            .get_or_init(self.provider.as_ref(), &self.competency_texts)
            .await?)
    }

    /// Cosine score of every competency, in catalog order.
    async fn competency_scores(&self, text: &str) -> Result<Vec<f32>> {
        if self.competency_texts.is_empty() {
            return Ok(Vec::new());
        }

        let catalog_vectors = self.catalog_vectors().await?;
        let query = self.provider.embed(text).await?;
        debug!(
            "Scoring profile ({} chars) against {} competencies",
            text.len(),
            catalog_vectors.len()
        );
        Ok(score_all(&query, catalog_vectors)?)
    }

    fn pair_competencies(&self, scores: &[f32]) -> Vec<ScoredCompetency> {
        self.catalog
            .competencies()
            .iter()
            .zip(scores)
            .map(|(competency, &score)| ScoredCompetency {
                competency: competency.clone(),
                score,
            })
            .collect()
    }

    fn aggregate_jobs(&self, scores: &[f32]) -> Vec<ScoredJob> {
        let by_id: HashMap<&str, f32> = self
            .catalog
            .competencies()
            .iter()
            .zip(scores)
            .map(|(competency, &score)| (competency.id.as_str(), score))
            .collect();

        self.catalog
            .jobs()
            .iter()
            .map(|job| ScoredJob {
                job: job.clone(),
                score: job_score(job, &by_id),
            })
            .collect()
    }

    /// Score every competency, in catalog order.
    pub async fn score_competencies(&self, text: &str) -> Result<Vec<ScoredCompetency>> {
        let scores = self.competency_scores(text).await?;
        Ok(self.pair_competencies(&scores))
    }

    /// Score every job, in catalog order.
    pub async fn score_jobs(&self, text: &str) -> Result<Vec<ScoredJob>> {
        let scores = self.competency_scores(text).await?;
        Ok(self.aggregate_jobs(&scores))
    }

    /// The `k` competencies closest to `text`, highest first.
    pub async fn top_k_competencies(&self, text: &str, k: usize) -> Result<Vec<ScoredCompetency>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        Ok(top_k(self.score_competencies(text).await?, k))
    }

    /// The `k` jobs whose required competencies best match `text`, highest first.
    pub async fn top_k_jobs(&self, text: &str, k: usize) -> Result<Vec<ScoredJob>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        Ok(top_k(self.score_jobs(text).await?, k))
    }

    /// Both top-K lists, embedding `text` once.
    pub async fn analyze(
        &self,
        text: &str,
        competency_k: usize,
        job_k: usize,
    ) -> Result<ProfileAnalysis> {
        let scores = self.competency_scores(text).await?;
        let competencies = top_k(self.pair_competencies(&scores), competency_k);
        let jobs = top_k(self.aggregate_jobs(&scores), job_k);

        debug!(
            "Analysis kept {} competencies and {} jobs",
            competencies.len(),
            jobs.len()
        );
        Ok(ProfileAnalysis { competencies, jobs })
    }

    /// [`analyze`](Self::analyze) with the configured `k` values.
    pub async fn analyze_default(&self, text: &str) -> Result<ProfileAnalysis> {
        self.analyze(text, self.config.top_competencies, self.config.top_jobs)
            .await
    }
}

/// Builder for [`ProfileMatcher`].
pub struct ProfileMatcherBuilder {
    config: RankingConfig,
    catalog: Option<Arc<Catalog>>,
    data_dir: Option<PathBuf>,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    warm_up: bool,
}

impl ProfileMatcherBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RankingConfig::default(),
            catalog: None,
            data_dir: None,
            provider: None,
            warm_up: false,
        }
    }

    /// Use an already loaded catalog.
    pub fn with_catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Load the catalog from a data directory at build time.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the embedding provider.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the ranking configuration.
    pub fn with_config(mut self, config: RankingConfig) -> Self {
        self.config = config;
        self
    }

    /// Compute catalog embeddings during build.
    pub fn with_warm_up(mut self, enabled: bool) -> Self {
        self.warm_up = enabled;
        self
    }

    /// Build the matcher.
    pub async fn build(self) -> Result<ProfileMatcher> {
        let provider = self
            .provider
            .ok_or_else(|| RankingError::Config("no embedding provider set".to_string()))?;

        let catalog = match (self.catalog, self.data_dir) {
            (Some(catalog), _) => catalog,
            (None, Some(dir)) => Arc::new(Catalog::load_dir(&dir).await?),
            (None, None) => {
                return Err(RankingError::Config(
                    "no catalog or data directory set".to_string(),
                ));
            }
        };

        let matcher = ProfileMatcher::with_config(catalog, provider, self.config);
        if self.warm_up {
            matcher.warm_up().await?;
        }
        Ok(matcher)
    }
}

impl Default for ProfileMatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerlens_catalog::{Competency, Job};
    use careerlens_embeddings::HashingProvider;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Competency::new("c1", "Python", "Programming", "Python programming"),
                Competency::new("c2", "Markets", "Finance", "Financial markets"),
            ],
            vec![
                Job::new("J1", "Quant developer", "Both").with_requirements(["c1", "c2"]),
                Job::new("J2", "Python developer", "Code").with_requirements(["c1"]),
            ],
        )
        .unwrap()
    }

    fn matcher() -> ProfileMatcher {
        ProfileMatcher::new(Arc::new(catalog()), Arc::new(HashingProvider::new(512)))
    }

    #[tokio::test]
    async fn test_cache_fills_on_first_request() {
        let matcher = matcher();
        assert!(!matcher.is_warm());

        matcher.top_k_competencies("python", 1).await.unwrap();
        assert!(matcher.is_warm());
        assert_eq!(matcher.cache_stats().entries, 2);
    }

    #[tokio::test]
    async fn test_zero_k_skips_embedding() {
        let matcher = matcher();
        assert!(matcher.top_k_competencies("python", 0).await.unwrap().is_empty());
        assert!(matcher.top_k_jobs("python", 0).await.unwrap().is_empty());
        assert!(!matcher.is_warm());
    }

    #[tokio::test]
    async fn test_analyze_matches_individual_calls() {
        let matcher = matcher();
        let text = "I write Python programming exercises";

        let analysis = matcher.analyze(text, 2, 2).await.unwrap();
        assert_eq!(
            analysis.competencies,
            matcher.top_k_competencies(text, 2).await.unwrap()
        );
        assert_eq!(analysis.jobs, matcher.top_k_jobs(text, 2).await.unwrap());
        assert!(analysis.is_complete());
    }

    #[tokio::test]
    async fn test_analyze_default_uses_config() {
        let matcher = ProfileMatcher::with_config(
            Arc::new(catalog()),
            Arc::new(HashingProvider::new(64)),
            RankingConfig::default().with_top_competencies(1).with_top_jobs(1),
        );
        let analysis = matcher.analyze_default("python").await.unwrap();
        assert_eq!(analysis.competencies.len(), 1);
        assert_eq!(analysis.jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_builder_requires_provider() {
        let result = ProfileMatcher::builder().with_catalog(catalog()).build().await;
        assert!(matches!(result, Err(RankingError::Config(_))));
    }

    #[tokio::test]
    async fn test_builder_requires_catalog() {
        let result = ProfileMatcher::builder()
            .with_provider(Arc::new(HashingProvider::new(8)))
            .build()
            .await;
        assert!(matches!(result, Err(RankingError::Config(_))));
    }

    #[tokio::test]
    async fn test_builder_warm_up() {
        let matcher = ProfileMatcher::builder()
            .with_catalog(catalog())
            .with_provider(Arc::new(HashingProvider::new(8)))
            .with_warm_up(true)
            .build()
            .await
            .unwrap();
        assert!(matcher.is_warm());
    }
}
