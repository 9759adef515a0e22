//! Cosine similarity between TF-IDF vectors.

use std::collections::BTreeSet;

use serde::Serialize;

use super::tfidf::DocumentVector;

/// Cosine similarity over the union of both key sets (missing keys weigh 0).
///
/// Returns `0.0` when either vector has zero norm. Weights are non-negative,
/// so the result lies in `[0, 1]`; it is clamped to absorb rounding error.
pub fn cosine_similarity(a: &DocumentVector, b: &DocumentVector) -> f64 {
    let keys: BTreeSet<&str> = a.terms().chain(b.terms()).collect();

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for key in keys {
        let va = a.weight(key);
        let vb = b.weight(key);
        dot += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return 0.0;
    }
    (dot / magnitude).clamp(0.0, 1.0)
}

/// Similarity of one submission to each exemplar tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExemplarSimilarities {
    pub excellent: f64,
    pub good: f64,
    pub basic: f64,
}

impl ExemplarSimilarities {
    /// Highest of the three; this is the base similarity of a submission.
    pub fn max(&self) -> f64 {
        self.excellent.max(self.good).max(self.basic)
    }
}
