//! Catalog record types.

use serde::{Deserialize, Serialize};

/// A skill the profile text is scored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    /// Unique identifier (e.g. "C-DATA-01").
    pub id: String,

    /// Short display name.
    pub label: String,

    /// Category the competency belongs to.
    pub block: String,

    /// Text that gets embedded and compared with the profile.
    pub description: String,
}

impl Competency {
    /// Create a new competency.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        block: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            block: block.into(),
            description: description.into(),
        }
    }
}

/// A job whose fit is derived from its required competencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier.
    pub id: String,

    /// Job title.
    pub title: String,

    /// What the job involves.
    pub description: String,

    /// Competency ids this job relies on. Ids need not exist in the catalog.
    #[serde(default)]
    pub required_competencies: Vec<String>,
}

impl Job {
    /// Create a job with no required competencies.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            required_competencies: Vec::new(),
        }
    }

    /// Set the required competency ids.
    pub fn with_requirements<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_competencies = ids.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_without_requirements_field() {
        let job: Job =
            serde_json::from_str(r#"{"id":"J1","title":"Analyst","description":"Reports"}"#)
                .unwrap();
        assert!(job.required_competencies.is_empty());
    }

    #[test]
    fn test_job_builder() {
        let job = Job::new("J1", "Data Engineer", "Pipelines").with_requirements(["C1", "C2"]);
        assert_eq!(job.required_competencies, vec!["C1", "C2"]);
    }

    #[test]
    fn test_competency_roundtrips_field_names() {
        let competency = Competency::new("C1", "Python", "Programming", "Python programming");
        let value = serde_json::to_value(&competency).unwrap();
        assert_eq!(value["block"], "Programming");
        assert_eq!(value["description"], "Python programming");
    }
}
