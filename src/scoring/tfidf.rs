//! TF-IDF over a tiny ad hoc corpus (the submission plus three exemplars).
//!
//! Every output vector carries the full corpus vocabulary, zero weights
//! included, so vectors from the same call always share their key set.
//!
//! Term frequency is `count / token_count`. A document without tokens has a
//! term frequency of `0.0` for every term, which gives an all-zero vector
//! instead of `NaN` weights.

use std::collections::BTreeMap;

use super::tokenize::tokenize;

/// Token occurrence counts of a single document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermCounts {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl TermCounts {
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Number of tokens in the document (with repetitions).
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    fn term_frequency(&self, term: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(term) as f64 / self.total as f64
    }
}

/// Term → TF-IDF weight. Ordered so that sums over it are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentVector(BTreeMap<String, f64>);

impl DocumentVector {
    /// Weight of `term`, `0.0` when absent.
    pub fn weight(&self, term: &str) -> f64 {
        self.0.get(term).copied().unwrap_or(0.0)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every weight is zero (or the vector has no terms).
    pub fn is_zero(&self) -> bool {
        self.0.values().all(|w| *w == 0.0)
    }
}

impl FromIterator<(String, f64)> for DocumentVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Vectorizes raw documents. One vector per input, same order.
pub fn calculate_tfidf(documents: &[&str]) -> Vec<DocumentVector> {
    let counts: Vec<TermCounts> = documents.iter().map(|d| TermCounts::from_text(d)).collect();
    let refs: Vec<&TermCounts> = counts.iter().collect();
    vectorize(&refs)
}

/// Vectorizes pre-counted documents.
///
/// Document frequency is indexed once up front; `idf = ln(N / max(df, 1))`.
pub fn vectorize(documents: &[&TermCounts]) -> Vec<DocumentVector> {
    let doc_count = documents.len() as f64;

    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in documents {
        for term in doc.terms() {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let idf: Vec<(&str, f64)> = doc_freq
        .iter()
        .map(|(term, df)| (*term, (doc_count / (*df).max(1) as f64).ln()))
        .collect();

    documents
        .iter()
        .map(|doc| {
            idf.iter()
                .map(|(term, idf)| (term.to_string(), doc.term_frequency(term) * idf))
                .collect::<DocumentVector>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn vectors_share_the_corpus_vocabulary() {
        let vs = calculate_tfidf(&["alfa beta", "beta gamma", "delta"]);
        assert_eq!(vs.len(), 3);
        for v in &vs {
            assert_eq!(
                v.terms().collect::<Vec<_>>(),
                vec!["alfa", "beta", "delta", "gamma"]
            );
        }
    }

    #[test]
    fn weights_follow_tf_times_idf() {
        let vs = calculate_tfidf(&["alfa alfa beta", "beta gamma"]);
        // alfa: tf 2/3, idf ln(2/1)
        assert!((vs[0].weight("alfa") - (2.0 / 3.0) * 2f64.ln()).abs() < EPS);
        // beta appears in both documents: idf ln(1) = 0
        assert_eq!(vs[0].weight("beta"), 0.0);
        assert_eq!(vs[1].weight("beta"), 0.0);
        // absent term has zero tf
        assert_eq!(vs[1].weight("alfa"), 0.0);
        assert!((vs[1].weight("gamma") - 0.5 * 2f64.ln()).abs() < EPS);
    }

    #[test]
    fn empty_document_gets_a_zero_vector_not_nan() {
        let vs = calculate_tfidf(&["", "alfa beta", "!!!"]);
        assert!(vs[0].is_zero());
        assert!(vs[2].is_zero());
        assert!(vs.iter().flat_map(|v| v.iter()).all(|(_, w)| w.is_finite()));
        assert!(!vs[1].is_zero());
    }

    #[test]
    fn all_empty_corpus_has_no_vocabulary() {
        let vs = calculate_tfidf(&["", " "]);
        assert_eq!(vs.len(), 2);
        assert!(vs.iter().all(DocumentVector::is_empty));
    }

    #[test]
    fn term_counts_track_repetitions() {
        let tc = TermCounts::from_text("Steg steg STEG svar");
        assert_eq!(tc.total(), 4);
        assert_eq!(tc.count("steg"), 3);
        assert_eq!(tc.count("saknas"), 0);
        assert!(TermCounts::from_text("x").is_empty());
    }
}
