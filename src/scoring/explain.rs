//! Human-readable (Swedish) summary of a scoring run.

use super::band::{closing_remark_for, GradeBand};
use super::similarity::ExemplarSimilarities;

fn similarity_level(max_similarity: f64) -> &'static str {
    if max_similarity > 0.8 {
        "hög"
    } else if max_similarity > 0.5 {
        "medel"
    } else {
        "låg"
    }
}

fn keyword_sentence(keyword_bonus: f64) -> &'static str {
    if keyword_bonus > 0.7 {
        "Innehåller många relevanta matematiska termer. "
    } else if keyword_bonus > 0.4 {
        "Innehåller några matematiska termer. "
    } else {
        "Saknar många viktiga matematiska termer. "
    }
}

fn structure_sentence(structure_bonus: f64) -> &'static str {
    if structure_bonus > 0.6 {
        "Väl strukturerad lösning med tydliga steg. "
    } else if structure_bonus > 0.3 {
        "Viss struktur men kan förbättras. "
    } else {
        "Saknar tydlig struktur och stegvis lösning. "
    }
}

/// Similarity level, keyword coverage, structure, then a band-specific remark.
pub fn generate_explanation(
    similarities: &ExemplarSimilarities,
    keyword_bonus: f64,
    structure_bonus: f64,
    band: GradeBand,
) -> String {
    let max_sim = similarities.max();
    // one decimal, halves rounded up (6.25 -> 6.3)
    let percent = (max_sim * 1000.0).round() / 10.0;
    let mut out = format!(
        "Texten visar {} likhet med exempel på bra lösningar ({:.1}%). ",
        similarity_level(max_sim),
        percent
    );
    out.push_str(keyword_sentence(keyword_bonus));
    out.push_str(structure_sentence(structure_bonus));
    out.push_str(closing_remark_for(band.as_str()));
    out
}
