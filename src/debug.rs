//! In-memory request stats and a short history of scored submissions.
//! Raw submission text is never stored; entries carry an anonymized hash.

use axum::{extract::Query, routing::get, Json, Router};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, sync::Mutex, time::Instant};

use crate::scoring::{anon_hash, GradeBand, ScoreResult};

const HISTORY_CAP: usize = 500;
const LAT_CAP: usize = 200;
const SLOW_REQ_MS: u128 = 250;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub at_ms: u128,
    pub id: String,
    pub subject: String,
    pub subject_fallback: bool,
    pub band: GradeBand,
    pub score: u32,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Stats {
    pub total_requests: u64,
    pub score_requests: u64,
    pub batch_requests: u64,
    pub rejected_requests: u64,
    pub last_slow_ms: Option<u128>,
    pub rolling_avg_ms: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Single,
    Batch,
}

static HISTORY: Lazy<Mutex<VecDeque<ScoredEntry>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(HISTORY_CAP)));
static STATS: Lazy<Mutex<Stats>> = Lazy::new(|| Mutex::new(Stats::default()));
static LAT_MS: Lazy<Mutex<VecDeque<u128>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(LAT_CAP)));

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub fn router() -> Router {
    Router::new()
        .route("/debug/history", get(history))
        .route("/debug/stats", get(stats))
}

pub fn record_request(kind: RequestKind) {
    let Ok(mut s) = STATS.lock() else { return };
    s.total_requests += 1;
    match kind {
        RequestKind::Single => s.score_requests += 1,
        RequestKind::Batch => s.batch_requests += 1,
    }
}

pub fn record_rejection() {
    if let Ok(mut s) = STATS.lock() {
        s.rejected_requests += 1;
    }
}

pub fn record_latency(lat_ms: u128) {
    let avg = {
        let Ok(mut q) = LAT_MS.lock() else { return };
        if q.len() >= LAT_CAP {
            q.pop_front();
        }
        q.push_back(lat_ms);
        let sum: u128 = q.iter().copied().sum();
        sum as f64 / q.len() as f64
    };

    let Ok(mut s) = STATS.lock() else { return };
    s.rolling_avg_ms = Some(avg);
    if lat_ms > SLOW_REQ_MS {
        s.last_slow_ms = Some(lat_ms);
    }
}

pub fn record_score(text: &str, result: &ScoreResult) {
    let Ok(mut h) = HISTORY.lock() else { return };
    if h.len() >= HISTORY_CAP {
        h.pop_front();
    }
    h.push_back(ScoredEntry {
        at_ms: now_ms(),
        id: anon_hash(text),
        subject: result.subject.clone(),
        subject_fallback: result.subject_fallback,
        band: result.predicted_band,
        score: result.predicted_score,
    });
}

/// Latest `limit` entries, oldest first.
pub fn recent(limit: usize) -> Vec<ScoredEntry> {
    let Ok(h) = HISTORY.lock() else {
        return Vec::new();
    };
    let start = h.len().saturating_sub(limit);
    h.iter().skip(start).cloned().collect()
}

pub fn snapshot() -> Stats {
    STATS.lock().map(|s| s.clone()).unwrap_or_default()
}

async fn history(Query(q): Query<HistoryQuery>) -> Json<Vec<ScoredEntry>> {
    Json(recent(q.limit.unwrap_or(50)))
}

async fn stats() -> Json<Stats> {
    Json(snapshot())
}

fn now_ms() -> u128 {
    static START: Lazy<Instant> = Lazy::new(Instant::now);
    START.elapsed().as_millis()
}
