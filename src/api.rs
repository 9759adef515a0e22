use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::config::ScorerConfig;
use crate::debug::{self, RequestKind};
use crate::error::ScoreError;
use crate::scoring::{supported_subjects, BaselineScorer, ScoreResult, MODEL_USED};

#[derive(Clone)]
pub struct AppState {
    scorer: Arc<BaselineScorer>,
}

impl AppState {
    pub fn new(scorer: BaselineScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }

    /// Scorer configured from `config/scorer.toml` (or `SCORER_CONFIG_PATH`) and env.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(BaselineScorer::new(ScorerConfig::load()?)))
    }

    pub fn scorer(&self) -> &BaselineScorer {
        &self.scorer
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/ml/health", get(ml_health))
        .route("/api/ml/score-text", post(score_text_query))
        .route("/api/ml/score", post(score_json))
        .route("/api/ml/score-batch", post(score_batch))
        .with_state(state)
        .merge(debug::router())
        .layer(CorsLayer::very_permissive())
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Serialize)]
struct Endpoints {
    score_text: &'static str,
    score: &'static str,
    score_batch: &'static str,
    health: &'static str,
}

#[derive(Serialize)]
struct MlHealth {
    status: &'static str,
    model_version: &'static str,
    timestamp: String,
    strict_subjects: bool,
    subjects: Vec<&'static str>,
    endpoints: Endpoints,
}

async fn ml_health(State(state): State<AppState>) -> Json<MlHealth> {
    Json(MlHealth {
        status: "healthy",
        model_version: MODEL_USED,
        timestamp: Utc::now().to_rfc3339(),
        strict_subjects: state.scorer.config().strict_subjects,
        subjects: supported_subjects(),
        endpoints: Endpoints {
            score_text: "/api/ml/score-text",
            score: "/api/ml/score",
            score_batch: "/api/ml/score-batch",
            health: "/api/ml/health",
        },
    })
}

/// `POST /api/ml/score-text?text=...&subject=...`; any body is ignored.
async fn score_text_query(
    State(state): State<AppState>,
    Query(req): Query<ScoreRequest>,
) -> Result<Json<ScoreResult>, ScoreError> {
    debug::record_request(RequestKind::Single);
    score_one(&state, &req).map(Json)
}

async fn score_json(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, ScoreError> {
    debug::record_request(RequestKind::Single);
    score_one(&state, &req).map(Json)
}

/// All-or-nothing: the first rejected item fails the whole batch.
async fn score_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<ScoreRequest>>,
) -> Result<Json<Vec<ScoreResult>>, ScoreError> {
    debug::record_request(RequestKind::Batch);
    items
        .iter()
        .map(|req| score_one(&state, req))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

fn score_one(state: &AppState, req: &ScoreRequest) -> Result<ScoreResult, ScoreError> {
    let started = Instant::now();
    let outcome = state.scorer.score(&req.text, req.subject.as_deref());
    debug::record_latency(started.elapsed().as_millis());

    match outcome {
        Ok(result) => {
            debug::record_score(&req.text, &result);
            Ok(result)
        }
        Err(e) => {
            debug::record_rejection();
            counter!("baseline_score_rejected_total").increment(1);
            Err(e)
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    subject: String,
    supported: String,
}

impl IntoResponse for ScoreError {
    fn into_response(self) -> Response {
        let body = match &self {
            ScoreError::UnsupportedSubject { subject, supported } => ErrorBody {
                error: self.to_string(),
                subject: subject.clone(),
                supported: supported.clone(),
            },
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}
