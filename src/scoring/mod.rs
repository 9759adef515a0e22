// src/scoring/mod.rs
//! Baseline scorer: TF-IDF similarity to bundled exemplars plus keyword and
//! structure bonuses, mapped to a grade band with a written explanation.
//!
//! Pipeline per call:
//! 1) resolve subject → exemplar set (fallback to mathematics, or reject in strict mode)
//! 2) vectorize `[submission, excellent, good, basic]`
//! 3) cosine similarity to each exemplar, keep the maximum
//! 4) keyword / structure bonuses on the raw text
//! 5) combine, clamp, band, explain

pub mod band;
pub mod bonus;
pub mod exemplars;
pub mod explain;
pub mod similarity;
pub mod tfidf;
pub mod tokenize;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::ScorerConfig;
use crate::error::ScoreError;

pub use band::{map_to_band, GradeBand};
pub use bonus::{keyword_bonus, structure_bonus};
pub use exemplars::{lookup_subject, supported_subjects, SubjectLookup};
pub use explain::generate_explanation;
pub use similarity::{cosine_similarity, ExemplarSimilarities};
pub use tfidf::{calculate_tfidf, DocumentVector, TermCounts};
pub use tokenize::tokenize;

/// Identifier reported in `model_used`.
pub const MODEL_USED: &str = "TF-IDF Baseline Model";

/// Intermediate scores behind a result, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBreakdown {
    pub content_similarity: f64,
    pub keyword_coverage: f64,
    pub structure_quality: f64,
    pub combined_score: f64,
}

/// Output of one scoring call. Field names match the remote scoring endpoint,
/// so callers can swap one for the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// `round(combined_score * 100)`, 0..=100.
    pub predicted_score: u32,
    pub predicted_band: GradeBand,
    pub confidence: f64,
    pub reason: String,
    pub model_used: String,
    pub processing_time_ms: u64,
    pub analysis_breakdown: AnalysisBreakdown,
    /// Subject whose exemplars were used.
    pub subject: String,
    /// True when the requested subject had no exemplars of its own.
    pub subject_fallback: bool,
}

/// Scorer with its tunables. Cheap to clone, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct BaselineScorer {
    config: ScorerConfig,
}

impl BaselineScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score `text` for `subject` (`None` or blank → configured default subject).
    ///
    /// Fails only in strict mode, for a subject without exemplars.
    pub fn score(&self, text: &str, subject: Option<&str>) -> Result<ScoreResult, ScoreError> {
        let requested = self.requested_subject(subject);
        let lookup = lookup_subject(requested);
        if lookup.is_fallback() && self.config.strict_subjects {
            return Err(ScoreError::UnsupportedSubject {
                subject: requested.to_string(),
                supported: supported_subjects().join(", "),
            });
        }
        Ok(self.score_lookup(text, requested, lookup))
    }

    /// Like [`score`](Self::score) but never rejects: unknown subjects use
    /// the default exemplars and are flagged with `subject_fallback`.
    pub fn score_with_fallback(&self, text: &str, subject: Option<&str>) -> ScoreResult {
        let requested = self.requested_subject(subject);
        self.score_lookup(text, requested, lookup_subject(requested))
    }

    fn requested_subject<'a>(&'a self, subject: Option<&'a str>) -> &'a str {
        subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.config.default_subject)
    }

    fn score_lookup(&self, text: &str, requested: &str, lookup: SubjectLookup) -> ScoreResult {
        let started = Instant::now();

        if lookup.is_fallback() {
            warn!(
                requested,
                used = lookup.subject(),
                "no exemplars for subject; scoring against default exemplars"
            );
            counter!("baseline_score_subject_fallback_total").increment(1);
        }

        // (1) vectors over [submission, excellent, good, basic]
        let submission = TermCounts::from_text(text);
        let [excellent, good, basic] = exemplars::exemplar_counts(lookup.subject());
        let vectors = tfidf::vectorize(&[&submission, excellent, good, basic]);

        // (2) similarity to each tier
        let similarities = ExemplarSimilarities {
            excellent: cosine_similarity(&vectors[0], &vectors[1]),
            good: cosine_similarity(&vectors[0], &vectors[2]),
            basic: cosine_similarity(&vectors[0], &vectors[3]),
        };
        let base_similarity = similarities.max();

        // (3) bonuses
        let keyword = keyword_bonus(text);
        let structure = structure_bonus(text);

        // (4) combine
        let combined = (base_similarity
            + keyword * self.config.keyword_bonus_weight
            + structure * self.config.structure_bonus_weight)
            .clamp(0.0, 1.0);
        let predicted_score = (combined * 100.0).round() as u32;
        let band = map_to_band(combined);
        let reason = generate_explanation(&similarities, keyword, structure, band);
        let confidence = (base_similarity + self.config.confidence_offset).min(1.0);

        let elapsed = started.elapsed();
        let processing_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        counter!("baseline_score_requests_total", "band" => band.as_str()).increment(1);
        histogram!("baseline_score_processing_ms").record(elapsed.as_secs_f64() * 1000.0);
        debug!(
            target: "scoring",
            id = %anon_hash(text),
            tokens = submission.total(),
            subject = lookup.subject(),
            band = %band,
            score = predicted_score,
            similarity = base_similarity,
            "scored submission"
        );

        ScoreResult {
            predicted_score,
            predicted_band: band,
            confidence,
            reason,
            model_used: MODEL_USED.to_string(),
            processing_time_ms,
            analysis_breakdown: AnalysisBreakdown {
                content_similarity: base_similarity,
                keyword_coverage: keyword,
                structure_quality: structure,
                combined_score: combined,
            },
            subject: lookup.subject().to_string(),
            subject_fallback: lookup.is_fallback(),
        }
    }
}

/// Score with default settings. Unknown subjects fall back to mathematics.
pub fn score_text(text: &str, subject: &str) -> ScoreResult {
    BaselineScorer::default().score_with_fallback(text, Some(subject))
}

/// Short SHA-256 prefix used to correlate log lines without logging raw text.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
