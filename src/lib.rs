// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod debug;
pub mod error;
pub mod metrics;
pub mod scoring;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::ScorerConfig;
pub use crate::error::ScoreError;
pub use crate::scoring::{
    score_text, AnalysisBreakdown, BaselineScorer, GradeBand, ScoreResult, MODEL_USED,
};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install compact tracing logs when `SCORER_DEV_LOG=1`.
/// Filter comes from `RUST_LOG`, defaulting to `baseline_scorer=info,scoring=info,warn`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_dev_tracing() {
    let on = std::env::var("SCORER_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");
    if !on {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("baseline_scorer=info,scoring=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}
