//! Configuration for profile ranking.

use serde::{Deserialize, Serialize};

/// How many results an analysis returns when the caller does not say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of competencies to keep.
    pub top_competencies: usize,

    /// Number of jobs to keep.
    pub top_jobs: usize,
}

impl RankingConfig {
    /// Set the number of competencies to keep.
    pub fn with_top_competencies(mut self, k: usize) -> Self {
        self.top_competencies = k;
        self
    }

    /// Set the number of jobs to keep.
    pub fn with_top_jobs(mut self, k: usize) -> Self {
        self.top_jobs = k;
        self
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_competencies: 5,
            top_jobs: 3,
        }
    }
}
