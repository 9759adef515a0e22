//! Bundled reference answers and the domain keyword table.
//!
//! All tables are `static` data; the tokenized exemplars are computed on
//! first use and cached for the life of the process.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::tfidf::TermCounts;

pub const DEFAULT_SUBJECT: &str = "mathematics";

/// Reference answers for one subject, one per quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExemplarSet {
    pub excellent: &'static str,
    pub good: &'static str,
    pub basic: &'static str,
}

const MATHEMATICS: ExemplarSet = ExemplarSet {
    excellent: "
        Lösning av andragradsekvation med faktorisering
        Steg 1: Identifiera ekvationstyp standardform ax² + bx + c = 0
        Steg 2: Hitta faktorer för faktorisering
        Steg 3: Faktorisering och tillämpa nollproduktregeln
        Steg 4: Verifiering av lösningarna
        Slutsats med korrekt svar
    ",
    good: "
        Andragradsekvation lösning
        Faktorisering metod
        Hitta faktorer
        Lösningar med nollproduktregeln
        Kontroll av svar
    ",
    basic: "
        Ekvation
        Faktorisering
        Lösningar
        Svar
    ",
};

static SUBJECTS: &[(&str, ExemplarSet)] = &[(DEFAULT_SUBJECT, MATHEMATICS)];

/// Keyword → weight (1..=3). Hyphenated terms are matched as token sequences.
pub static KEYWORD_WEIGHTS: &[(&str, u32)] = &[
    // method
    ("faktorisering", 3),
    ("kvadratkomplettering", 3),
    ("pq-formeln", 3),
    ("abc-formeln", 3),
    ("substitution", 2),
    ("elimination", 2),
    // process
    ("steg", 2),
    ("metod", 2),
    ("lösning", 2),
    ("beräkning", 2),
    ("analys", 2),
    // verification
    ("kontroll", 3),
    ("verifiering", 3),
    ("kontrollera", 2),
    ("bekräfta", 2),
    // terms
    ("ekvation", 1),
    ("andragradsekvation", 2),
    ("koefficient", 2),
    ("konstant", 1),
    ("variabel", 1),
    ("funktion", 1),
    // solution
    ("svar", 2),
    ("resultat", 1),
    ("slutsats", 2),
    ("lösningar", 2),
];

/// Term counts of `[excellent, good, basic]`, per subject.
static EXEMPLAR_COUNTS: Lazy<HashMap<&'static str, [TermCounts; 3]>> = Lazy::new(|| {
    SUBJECTS
        .iter()
        .map(|(name, set)| (*name, count_tiers(set)))
        .collect()
});

static DEFAULT_COUNTS: Lazy<[TermCounts; 3]> = Lazy::new(|| count_tiers(&MATHEMATICS));

fn count_tiers(set: &ExemplarSet) -> [TermCounts; 3] {
    [
        TermCounts::from_text(set.excellent),
        TermCounts::from_text(set.good),
        TermCounts::from_text(set.basic),
    ]
}

/// Outcome of resolving a requested subject against the exemplar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectLookup {
    /// The subject has its own exemplars.
    Found(&'static str),
    /// Unknown subject; the default subject's exemplars stand in.
    Fallback { used: &'static str },
}

impl SubjectLookup {
    pub fn subject(&self) -> &'static str {
        match *self {
            SubjectLookup::Found(s) => s,
            SubjectLookup::Fallback { used } => used,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SubjectLookup::Fallback { .. })
    }
}

/// Case-insensitive, whitespace-trimmed lookup.
pub fn lookup_subject(requested: &str) -> SubjectLookup {
    let wanted = requested.trim().to_lowercase();
    match SUBJECTS.iter().find(|(name, _)| *name == wanted) {
        Some((name, _)) => SubjectLookup::Found(*name),
        None => SubjectLookup::Fallback {
            used: DEFAULT_SUBJECT,
        },
    }
}

/// Names of all subjects with bundled exemplars.
pub fn supported_subjects() -> Vec<&'static str> {
    SUBJECTS.iter().map(|(name, _)| *name).collect()
}

/// Exemplars for a subject name as returned by [`lookup_subject`].
/// Unknown names yield the default subject's set.
pub fn exemplar_set(subject: &str) -> ExemplarSet {
    SUBJECTS
        .iter()
        .find(|(name, _)| *name == subject)
        .map(|(_, set)| *set)
        .unwrap_or(MATHEMATICS)
}

/// Cached term counts for `[excellent, good, basic]` of `subject`.
pub fn exemplar_counts(subject: &str) -> &'static [TermCounts; 3] {
    EXEMPLAR_COUNTS.get(subject).unwrap_or(&*DEFAULT_COUNTS)
}
