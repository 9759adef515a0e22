//! Letter grade bands and the score → band mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeBand {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl GradeBand {
    /// Bands in the order thresholds are checked (best first).
    pub const DESCENDING: [GradeBand; 6] = [
        GradeBand::A,
        GradeBand::B,
        GradeBand::C,
        GradeBand::D,
        GradeBand::E,
        GradeBand::F,
    ];

    /// Minimum combined score for the band.
    pub fn threshold(self) -> f64 {
        match self {
            GradeBand::A => 0.85,
            GradeBand::B => 0.70,
            GradeBand::C => 0.55,
            GradeBand::D => 0.40,
            GradeBand::E => 0.25,
            GradeBand::F => 0.00,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeBand::A => "A",
            GradeBand::B => "B",
            GradeBand::C => "C",
            GradeBand::D => "D",
            GradeBand::E => "E",
            GradeBand::F => "F",
        }
    }

    /// Closing sentence of the explanation for this band.
    pub fn closing_remark(self) -> &'static str {
        match self {
            GradeBand::A => "Utmärkt lösning med hög kvalitet.",
            GradeBand::B => "Bra lösning med mindre förbättringsmöjligheter.",
            GradeBand::C => "Acceptabel lösning men saknar detaljer.",
            GradeBand::D => "Grundläggande lösning som behöver utvecklas.",
            GradeBand::E => "Ofullständig lösning med stora brister.",
            GradeBand::F => "Otillräcklig lösning som inte uppfyller kraven.",
        }
    }
}

/// Closing remark for a band label; unknown labels get an empty remark.
pub fn closing_remark_for(label: &str) -> &'static str {
    label
        .parse::<GradeBand>()
        .map(GradeBand::closing_remark)
        .unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade band '{0}'")]
pub struct UnknownBand(pub String);

impl FromStr for GradeBand {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(GradeBand::A),
            "B" => Ok(GradeBand::B),
            "C" => Ok(GradeBand::C),
            "D" => Ok(GradeBand::D),
            "E" => Ok(GradeBand::E),
            "F" => Ok(GradeBand::F),
            _ => Err(UnknownBand(s.to_string())),
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First band (A → F) whose threshold `score` meets or exceeds.
/// Anything below every threshold, including `NaN`, maps to `F`.
pub fn map_to_band(score: f64) -> GradeBand {
    GradeBand::DESCENDING
        .into_iter()
        .find(|band| score >= band.threshold())
        .unwrap_or(GradeBand::F)
}
