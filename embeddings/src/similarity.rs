//! Cosine scoring.

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Cosine similarity of `a` and `b`, in `[-1, 1]`.
///
/// A zero vector on either side has no direction and scores 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / denom)
}

/// Score `query` against every catalog vector, keeping catalog order.
pub fn score_all(query: &[f32], catalog: &[Embedding]) -> Result<Vec<f32>> {
    catalog
        .iter()
        .map(|candidate| cosine_similarity(query, candidate))
        .collect()
}

/// Scale `embedding` to unit length in place. Zero vectors are left alone.
pub fn normalize(embedding: &mut [f32]) {
    let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        embedding.iter_mut().for_each(|x| *x /= norm);
    }
}
