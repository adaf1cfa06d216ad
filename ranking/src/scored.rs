//! Ranked result types.

use careerlens_catalog::{Competency, Job};
use serde::{Deserialize, Serialize};

/// Anything carrying a similarity score.
pub trait Scored {
    fn score(&self) -> f32;
}

/// A competency paired with its cosine similarity to the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCompetency {
    pub competency: Competency,
    pub score: f32,
}

impl Scored for ScoredCompetency {
    fn score(&self) -> f32 {
        self.score
    }
}

/// A job paired with the mean score of its required competencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredJob {
    pub job: Job,
    pub score: f32,
}

impl Scored for ScoredJob {
    fn score(&self) -> f32 {
        self.score
    }
}

/// Both top-K lists for one profile text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    /// Best matching competencies, highest first.
    pub competencies: Vec<ScoredCompetency>,

    /// Best matching jobs, highest first.
    pub jobs: Vec<ScoredJob>,
}

impl ProfileAnalysis {
    /// Whether both lists are non-empty, the precondition for narrative generation.
    pub fn is_complete(&self) -> bool {
        !self.competencies.is_empty() && !self.jobs.is_empty()
    }
}
