use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and describe the scorer series.
    /// Fails if a recorder is already installed in this process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        describe_all();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe_all() {
    describe_counter!(
        "baseline_score_requests_total",
        "Submissions scored, labelled by grade band."
    );
    describe_counter!(
        "baseline_score_subject_fallback_total",
        "Submissions scored against default exemplars because the subject was unknown."
    );
    describe_counter!(
        "baseline_score_rejected_total",
        "Requests rejected (strict subject mode)."
    );
    describe_histogram!(
        "baseline_score_processing_ms",
        "Scoring time per submission in milliseconds."
    );
}
