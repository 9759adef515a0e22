// tests/api_http.rs
//
// HTTP-level tests for the scoring Router without opening sockets.
// The router is exercised directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET  /health
// - GET  /api/ml/health
// - POST /api/ml/score-text  (query params)
// - POST /api/ml/score       (JSON body, lenient + strict subjects)
// - POST /api/ml/score-batch
// - GET  /debug/stats

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use baseline_scorer::scoring::exemplars;
use baseline_scorer::{api, AppState, BaselineScorer, ScorerConfig};

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    api::router(AppState::new(BaselineScorer::default()))
}

fn strict_router() -> Router {
    api::router(AppState::new(BaselineScorer::new(ScorerConfig {
        strict_subjects: true,
        ..ScorerConfig::default()
    })))
}

async fn read_json(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn post_json(uri: &str, payload: &Json) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST")
}

#[tokio::test]
async fn health_returns_ok() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    assert_eq!(String::from_utf8_lossy(&bytes).trim(), "OK");
}

#[tokio::test]
async fn ml_health_reports_model_and_subjects() {
    let req = Request::builder()
        .uri("/api/ml/health")
        .body(Body::empty())
        .expect("build GET /api/ml/health");
    let resp = test_router().oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    assert_eq!(v["status"], "healthy");
    assert_eq!(v["model_version"], "TF-IDF Baseline Model");
    assert_eq!(v["strict_subjects"], false);
    assert!(v["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(v["subjects"]
        .as_array()
        .expect("subjects array")
        .contains(&json!("mathematics")));
    assert_eq!(v["endpoints"]["score"], "/api/ml/score");
}

#[tokio::test]
async fn score_text_reads_query_params() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/ml/score-text?text=hello%20world&subject=mathematics")
        .body(Body::empty())
        .expect("build POST /api/ml/score-text");
    let resp = test_router().oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    assert!(v["predicted_score"].as_u64().expect("score") < 25);
    assert_eq!(v["model_used"], "TF-IDF Baseline Model");
    assert_eq!(v["subject_fallback"], false);
}

#[tokio::test]
async fn score_json_returns_full_contract() {
    let text = exemplars::exemplar_set("mathematics").excellent;
    let resp = test_router()
        .oneshot(post_json("/api/ml/score", &json!({ "text": text, "subject": "mathematics" })))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    assert_eq!(v["predicted_band"], "A");
    assert!(v["predicted_score"].as_u64().expect("score") >= 85);
    assert!(v["reason"].as_str().is_some_and(|r| !r.is_empty()));
    for key in [
        "content_similarity",
        "keyword_coverage",
        "structure_quality",
        "combined_score",
    ] {
        assert!(
            v["analysis_breakdown"].get(key).is_some(),
            "missing analysis_breakdown.{key}"
        );
    }
}

#[tokio::test]
async fn subject_is_optional() {
    let resp = test_router()
        .oneshot(post_json("/api/ml/score", &json!({ "text": "Svar: x = 3" })))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);
    let v = read_json(resp).await;
    assert_eq!(v["subject"], "mathematics");
}

#[tokio::test]
async fn unknown_subject_is_flagged_in_lenient_mode() {
    let resp = test_router()
        .oneshot(post_json(
            "/api/ml/score",
            &json!({ "text": "Svar: x = 3", "subject": "chemistry" }),
        ))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);
    let v = read_json(resp).await;
    assert_eq!(v["subject_fallback"], true);
    assert_eq!(v["subject"], "mathematics");
}

#[tokio::test]
async fn unknown_subject_is_rejected_in_strict_mode() {
    let resp = strict_router()
        .oneshot(post_json(
            "/api/ml/score",
            &json!({ "text": "Svar: x = 3", "subject": "chemistry" }),
        ))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let v = read_json(resp).await;
    assert_eq!(v["subject"], "chemistry");
    assert!(v["supported"].as_str().expect("supported").contains("mathematics"));
    assert!(v["error"].as_str().is_some_and(|e| e.contains("chemistry")));
}

#[tokio::test]
async fn missing_text_is_a_client_error() {
    let resp = test_router()
        .oneshot(post_json("/api/ml/score", &json!({ "subject": "mathematics" })))
        .await
        .expect("oneshot");
    assert!(resp.status().is_client_error(), "got {}", resp.status());
}

#[tokio::test]
async fn batch_preserves_order() {
    let excellent = exemplars::exemplar_set("mathematics").excellent;
    let payload = json!([
        { "text": excellent },
        { "text": "hello world" },
        { "text": "" },
    ]);
    let resp = test_router()
        .oneshot(post_json("/api/ml/score-batch", &payload))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    let items = v.as_array().expect("array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["predicted_band"], "A");
    assert!(items[1]["predicted_score"].as_u64().expect("score") < 25);
    assert_eq!(items[2]["predicted_band"], "F");
}

#[tokio::test]
async fn strict_batch_fails_as_a_whole() {
    let payload = json!([
        { "text": "Svar: 1" },
        { "text": "Svar: 2", "subject": "history" },
    ]);
    let resp = strict_router()
        .oneshot(post_json("/api/ml/score-batch", &payload))
        .await
        .expect("oneshot");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn debug_stats_count_requests() {
    let app = test_router();
    app.clone()
        .oneshot(post_json("/api/ml/score", &json!({ "text": "Svar: 7" })))
        .await
        .expect("oneshot score");

    let req = Request::builder()
        .uri("/debug/stats")
        .body(Body::empty())
        .expect("build GET /debug/stats");
    let resp = app.oneshot(req).await.expect("oneshot stats");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = read_json(resp).await;
    assert!(v["total_requests"].as_u64().expect("total") >= 1);
    assert!(v["score_requests"].as_u64().expect("single") >= 1);
}
