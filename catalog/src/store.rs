//! Loading and lookup for the competency/job catalog.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{CatalogError, RecordKind, Result};
use crate::model::{Competency, Job};

/// File holding the competency array inside a data directory.
pub const COMPETENCIES_FILE: &str = "competencies.json";

/// File holding the job array inside a data directory.
pub const JOBS_FILE: &str = "jobs.json";

/// An immutable, validated set of competencies and jobs.
///
/// Record order is preserved from the source; ranking uses it to break ties.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    competencies: Vec<Competency>,
    jobs: Vec<Job>,
    competency_index: HashMap<String, usize>,
    job_index: HashMap<String, usize>,
}

/// A job requirement naming a competency that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub job_id: String,
    pub competency_id: String,
}

impl Catalog {
    /// Build a catalog from records, validating ids and descriptions.
    pub fn new(competencies: Vec<Competency>, jobs: Vec<Job>) -> Result<Self> {
        let competency_index = index_competencies(&competencies)?;
        let job_index = index_jobs(&jobs)?;

        let catalog = Self {
            competencies,
            jobs,
            competency_index,
            job_index,
        };

        for dangling in catalog.dangling_references() {
            warn!(
                "Job {} requires unknown competency {}; it will score 0.0",
                dangling.job_id, dangling.competency_id
            );
        }

        Ok(catalog)
    }

    /// A catalog with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the two JSON documents of a catalog.
    pub fn from_json(competencies_json: &str, jobs_json: &str) -> Result<Self> {
        let competencies = parse(competencies_json, COMPETENCIES_FILE)?;
        let jobs = parse(jobs_json, JOBS_FILE)?;
        Self::new(competencies, jobs)
    }

    /// Load `competencies.json` and `jobs.json` from `dir`.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let competencies_path = dir.join(COMPETENCIES_FILE);
        let jobs_path = dir.join(JOBS_FILE);

        let competencies_json = read(&competencies_path).await?;
        let jobs_json = read(&jobs_path).await?;

        let competencies = parse(&competencies_json, &competencies_path.display().to_string())?;
        let jobs = parse(&jobs_json, &jobs_path.display().to_string())?;
        let catalog = Self::new(competencies, jobs)?;

        info!(
            "Loaded catalog from {}: {} competencies, {} jobs",
            dir.display(),
            catalog.competencies.len(),
            catalog.jobs.len()
        );
        Ok(catalog)
    }

    /// All competencies, in source order.
    pub fn competencies(&self) -> &[Competency] {
        &self.competencies
    }

    /// All jobs, in source order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Look up a competency by id.
    pub fn competency(&self, id: &str) -> Option<&Competency> {
        self.competency_index
            .get(id)
            .map(|&i| &self.competencies[i])
    }

    /// Look up a job by id.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.job_index.get(id).map(|&i| &self.jobs[i])
    }

    /// Descriptions to embed, aligned with [`competencies`](Self::competencies).
    pub fn competency_texts(&self) -> Vec<String> {
        self.competencies
            .iter()
            .map(|c| c.description.clone())
            .collect()
    }

    /// Every job requirement that names a competency missing from the catalog.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.jobs
            .iter()
            .flat_map(|job| {
                job.required_competencies
                    .iter()
                    .filter(|id| !self.competency_index.contains_key(id.as_str()))
                    .map(|id| DanglingReference {
                        job_id: job.id.clone(),
                        competency_id: id.clone(),
                    })
            })
            .collect()
    }

    /// Whether the catalog has neither competencies nor jobs.
    pub fn is_empty(&self) -> bool {
        self.competencies.is_empty() && self.jobs.is_empty()
    }
}

async fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn parse<T: DeserializeOwned>(json: &str, origin: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn index_competencies(competencies: &[Competency]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(competencies.len());
    for (i, competency) in competencies.iter().enumerate() {
        require(RecordKind::Competency, &competency.id, "id", &competency.id)?;
        require(
            RecordKind::Competency,
            &competency.id,
            "description",
            &competency.description,
        )?;
        if index.insert(competency.id.clone(), i).is_some() {
            return Err(CatalogError::DuplicateId {
                kind: RecordKind::Competency,
                id: competency.id.clone(),
            });
        }
    }
    Ok(index)
}

fn index_jobs(jobs: &[Job]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        require(RecordKind::Job, &job.id, "id", &job.id)?;
        if index.insert(job.id.clone(), i).is_some() {
            return Err(CatalogError::DuplicateId {
                kind: RecordKind::Job,
                id: job.id.clone(),
            });
        }
    }
    Ok(index)
}

fn require(kind: RecordKind, id: &str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::EmptyField {
            kind,
            id: id.to_string(),
            field,
        });
    }
    Ok(())
}
