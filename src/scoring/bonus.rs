//! Heuristic bonuses computed next to the similarity score:
//! - keyword coverage: weighted share of domain keywords present in the text
//! - structure: share of structural markers (steps, numbered lines, answer,
//!   conclusion, check, verification) found in the raw text

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::exemplars::KEYWORD_WEIGHTS;
use super::tokenize::tokenize;

/// Keywords run through the tokenizer, so `pq-formeln` becomes `["pq", "formeln"]`.
static KEYWORD_TOKENS: Lazy<Vec<(Vec<String>, u32)>> = Lazy::new(|| {
    KEYWORD_WEIGHTS
        .iter()
        .map(|(kw, w)| (tokenize(kw), *w))
        .collect()
});

/// Step and line numbers are ASCII digits only.
static STRUCTURE_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)steg\s*[0-9]+",
        r"[0-9]+[.:]\s",
        r"(?i)svar\s*:",
        r"(?i)slutsats",
        r"(?i)kontroll",
        r"(?i)verifiering",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("structure marker regex"))
    .collect()
});

/// Found keyword weight divided by total keyword weight, in `[0, 1]`.
///
/// Presence only: repeating a keyword does not raise the bonus.
pub fn keyword_bonus(text: &str) -> f64 {
    let tokens = tokenize(text);
    let present: HashSet<&str> = tokens.iter().map(String::as_str).collect();

    let mut total_weight = 0u32;
    let mut found_weight = 0u32;
    for (seq, weight) in KEYWORD_TOKENS.iter() {
        total_weight += weight;
        if contains_sequence(&tokens, &present, seq) {
            found_weight += weight;
        }
    }

    if total_weight == 0 {
        return 0.0;
    }
    f64::from(found_weight) / f64::from(total_weight)
}

fn contains_sequence(tokens: &[String], present: &HashSet<&str>, seq: &[String]) -> bool {
    match seq {
        [] => false,
        [single] => present.contains(single.as_str()),
        _ => tokens.windows(seq.len()).any(|w| w == seq),
    }
}

/// Matched structural markers divided by the number of markers, in `[0, 1]`.
pub fn structure_bonus(text: &str) -> f64 {
    let found = STRUCTURE_MARKERS
        .iter()
        .filter(|re| re.is_match(text))
        .count();
    (found as f64 / STRUCTURE_MARKERS.len() as f64).min(1.0)
}
