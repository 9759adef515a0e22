//! Baseline scorer service: binary entrypoint.
//! Boots the Axum HTTP server with the scoring routes, debug stats and `/metrics`.

use baseline_scorer::{api, metrics::Metrics, AppState};
use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    baseline_scorer::init_dev_tracing();

    let state = AppState::from_env()?;
    info!(
        strict_subjects = state.scorer().config().strict_subjects,
        default_subject = %state.scorer().config().default_subject,
        "baseline scorer ready"
    );

    let mut router = api::router(state);
    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = ?e, "prometheus recorder not installed; /metrics disabled"),
    }

    Ok(router.into())
}
