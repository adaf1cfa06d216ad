//! Pure ranking and aggregation helpers.

use std::cmp::Reverse;
use std::collections::HashMap;

use careerlens_catalog::Job;
use ordered_float::OrderedFloat;

use crate::scored::Scored;

/// Keep the `k` highest-scoring items, highest first.
///
/// The sort is stable, so equal scores keep their input order. `k == 0`
/// yields an empty list and `k` past the end yields every item.
pub fn top_k<T: Scored>(mut items: Vec<T>, k: usize) -> Vec<T> {
    if k == 0 {
        return Vec::new();
    }
    items.sort_by_key(|item| Reverse(OrderedFloat(item.score())));
    items.truncate(k);
    items
}

/// Mean score of a job's required competencies.
///
/// Ids absent from `scores` count as 0.0 and still count towards the mean.
/// A job with no requirements scores 0.0.
pub fn job_score(job: &Job, scores: &HashMap<&str, f32>) -> f32 {
    if job.required_competencies.is_empty() {
        return 0.0;
    }
    let total: f32 = job
        .required_competencies
        .iter()
        .map(|id| scores.get(id.as_str()).copied().unwrap_or(0.0))
        .sum();
    total / job.required_competencies.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, f32);

    impl Scored for Item {
        fn score(&self) -> f32 {
            self.1
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item("a", 0.2),
            Item("b", 0.9),
            Item("c", 0.5),
            Item("d", 0.9),
            Item("e", -0.1),
        ]
    }

    fn names(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.0).collect()
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let ranked = top_k(items(), 10);
        assert_eq!(names(&ranked), vec!["b", "d", "c", "a", "e"]);
    }

    #[test]
    fn test_truncates_to_k() {
        assert_eq!(names(&top_k(items(), 2)), vec!["b", "d"]);
    }

    #[test]
    fn test_zero_k_is_empty() {
        assert!(top_k(items(), 0).is_empty());
    }

    #[test]
    fn test_prefix_property() {
        let full = top_k(items(), 5);
        for k in 0..=5 {
            assert_eq!(top_k(items(), k), full[..k].to_vec());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(top_k(Vec::<Item>::new(), 3).is_empty());
    }

    #[test]
    fn test_job_score_mean() {
        let scores = HashMap::from([("c1", 0.8), ("c2", 0.2)]);
        let job = Job::new("j", "J", "d").with_requirements(["c1", "c2"]);
        assert!((job_score(&job, &scores) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_job_score_missing_ids_count_as_zero() {
        let scores = HashMap::from([("c1", 0.8)]);
        let job = Job::new("j", "J", "d").with_requirements(["c1", "ghost"]);
        assert!((job_score(&job, &scores) - 0.4).abs() < 1e-6);

        let only_ghosts = Job::new("k", "K", "d").with_requirements(["ghost", "phantom"]);
        assert_eq!(job_score(&only_ghosts, &scores), 0.0);
    }

    #[test]
    fn test_job_score_no_requirements() {
        let scores = HashMap::from([("c1", 0.8)]);
        let job = Job::new("j", "J", "d");
        assert_eq!(job_score(&job, &scores), 0.0);
    }
}
