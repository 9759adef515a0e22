// src/config/scorer.rs
//! Tunable scoring constants, loaded from `config/scorer.toml`.
//!
//! ```toml
//! [scoring]
//! keyword_bonus_weight = 0.1
//! structure_bonus_weight = 0.1
//! confidence_offset = 0.2
//! strict_subjects = false
//! default_subject = "mathematics"
//! ```
//!
//! A missing file means built-in defaults. Out-of-range weights fall back to
//! their default individually. `SCORER_STRICT_SUBJECTS` overrides the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::scoring::exemplars::DEFAULT_SUBJECT;

pub const DEFAULT_SCORER_CONFIG_PATH: &str = "config/scorer.toml";
pub const ENV_SCORER_CONFIG_PATH: &str = "SCORER_CONFIG_PATH";
pub const ENV_SCORER_STRICT_SUBJECTS: &str = "SCORER_STRICT_SUBJECTS";

const DEFAULT_KEYWORD_BONUS_WEIGHT: f64 = 0.1;
const DEFAULT_STRUCTURE_BONUS_WEIGHT: f64 = 0.1;
const DEFAULT_CONFIDENCE_OFFSET: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Multiplier for the keyword coverage bonus in the combined score.
    pub keyword_bonus_weight: f64,
    /// Multiplier for the structure bonus in the combined score.
    pub structure_bonus_weight: f64,
    /// Added to the base similarity to form `confidence` (capped at 1.0).
    pub confidence_offset: f64,
    /// Reject unknown subjects instead of scoring them against the default exemplars.
    pub strict_subjects: bool,
    /// Subject used when a request names none.
    pub default_subject: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            keyword_bonus_weight: DEFAULT_KEYWORD_BONUS_WEIGHT,
            structure_bonus_weight: DEFAULT_STRUCTURE_BONUS_WEIGHT,
            confidence_offset: DEFAULT_CONFIDENCE_OFFSET,
            strict_subjects: false,
            default_subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ScorerFile {
    #[serde(default)]
    scoring: ScorerConfig,
}

impl ScorerConfig {
    /// Resolve the path from `SCORER_CONFIG_PATH` (or the default), load it,
    /// then apply env overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_SCORER_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCORER_CONFIG_PATH));

        let mut cfg = Self::load_from_path(&path)?;
        if let Some(strict) = parse_bool_env(std::env::var(ENV_SCORER_STRICT_SUBJECTS).ok()) {
            cfg.strict_subjects = strict;
        }
        Ok(cfg)
    }

    /// Load from a TOML file; a missing file yields defaults.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let cfg = Self::from_toml_str(&content)
                    .with_context(|| format!("invalid scorer config at {}", path.display()))?;
                info!(
                    path = %path.display(),
                    strict = cfg.strict_subjects,
                    "scorer config loaded"
                );
                Ok(cfg)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no scorer config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to read scorer config at {}: {}",
                path.display(),
                e
            )),
        }
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: ScorerFile = toml::from_str(toml_str)?;
        Ok(file.scoring.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.keyword_bonus_weight = unit_or(
            self.keyword_bonus_weight,
            DEFAULT_KEYWORD_BONUS_WEIGHT,
            "keyword_bonus_weight",
        );
        self.structure_bonus_weight = unit_or(
            self.structure_bonus_weight,
            DEFAULT_STRUCTURE_BONUS_WEIGHT,
            "structure_bonus_weight",
        );
        self.confidence_offset =
            unit_or(self.confidence_offset, DEFAULT_CONFIDENCE_OFFSET, "confidence_offset");

        let subject = self.default_subject.trim().to_lowercase();
        self.default_subject = if subject.is_empty() {
            DEFAULT_SUBJECT.to_string()
        } else {
            subject
        };
        self
    }
}

fn unit_or(value: f64, default: f64, field: &str) -> f64 {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        value
    } else {
        warn!(field, value, default, "scorer config value outside [0,1]; using default");
        default
    }
}

fn parse_bool_env(raw: Option<String>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
