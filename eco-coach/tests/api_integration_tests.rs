//! Integration tests for eco-coach API endpoints
//!
//! The advisor has no credential here, so every analysis takes the heuristic
//! path and results are deterministic.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use eco_coach::config::AdvisorConfig;
use eco_coach::db::waste_logs;
use eco_coach::models::NewWasteLog;
use eco_coach::services::{AnalysisService, RemoteAdvisorClient};
use eco_coach::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

/// Test helper: create test app with in-memory database and offline advisor
async fn create_test_app() -> (Router, sqlx::SqlitePool) {
    let pool = sqlx::SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    eco_coach::db::init_tables(&pool)
        .await
        .expect("Failed to initialize database schema");

    let advisor = RemoteAdvisorClient::new(AdvisorConfig::default()).unwrap();
    let state = AppState::new(pool.clone(), AnalysisService::new(Arc::new(advisor)));

    (build_router(state), pool)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn seed(pool: &sqlx::SqlitePool, user_id: i64, item: &str, category: &str, co2: f64, age_days: i64) -> i64 {
    waste_logs::insert_log(
        pool,
        NewWasteLog {
            user_id,
            item_name: item.to_string(),
            category: category.to_string(),
            quantity: 1.0,
            disposal_instruction: "Dispose.".to_string(),
            tip: "Reduce.".to_string(),
            co2_saved: co2,
            timestamp: Utc::now() - Duration::days(age_days),
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "eco-coach");
    assert_eq!(json["advisor_configured"], false);
}

#[tokio::test]
async fn test_analyze_banana_peel_offline() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(
        app,
        post_json("/api/analyze", json!({"item_name": "banana peel", "quantity": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"], "food");
    assert_eq!(json["co2_saved"], 0.5);
    assert_eq!(json["source"], "heuristic");
    assert!(json["disposal_instruction"].as_str().unwrap().contains("banana peel"));
}

#[tokio::test]
async fn test_analyze_defaults_quantity_to_one() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(app, post_json("/api/analyze", json!({"item_name": "old sock"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"], "other");
    assert_eq!(json["co2_saved"], 0.25);
}

#[tokio::test]
async fn test_analyze_blank_item_is_bad_request() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(app, post_json("/api/analyze", json!({"item_name": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_log_waste_persists_result() {
    let (app, pool) = create_test_app().await;

    let (status, json) = send(
        app,
        post_json(
            "/api/logs",
            json!({"user_id": 1, "item_name": "cardboard box", "quantity": 4}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["category"], "recyclable");
    assert_eq!(json["co2_saved"], 1.0);
    assert_eq!(json["user_id"], 1);

    let id = json["id"].as_i64().unwrap();
    let stored = waste_logs::get_log(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.item_name, "cardboard box");
    assert_eq!(stored.quantity, 4.0);
}

#[tokio::test]
async fn test_log_waste_rejects_non_positive_quantity() {
    let (app, pool) = create_test_app().await;

    let (status, _) = send(
        app,
        post_json("/api/logs", json!({"user_id": 1, "item_name": "can", "quantity": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(waste_logs::list_logs_for_user(&pool, 1, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_newest_first_with_recent_count() {
    let (app, pool) = create_test_app().await;
    seed(&pool, 1, "old jar", "glass", 0.15, 10).await;
    seed(&pool, 1, "new jar", "glass", 0.15, 1).await;
    seed(&pool, 2, "someone else", "glass", 0.15, 1).await;

    let (status, json) = send(app, get("/api/logs?user_id=1")).await;

    assert_eq!(status, StatusCode::OK);
    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["item_name"], "new jar");
    assert_eq!(json["recent_logs_count"], 1);
}

#[tokio::test]
async fn test_view_log_access_rules() {
    let (app, pool) = create_test_app().await;
    let id = seed(&pool, 1, "battery", "hazardous", 0.5, 0).await;

    let (status, json) = send(app.clone(), get(&format!("/api/logs/{}?user_id=1", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["item_name"], "battery");

    let (status, json) = send(app.clone(), get(&format!("/api/logs/{}?user_id=2", id))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "FORBIDDEN");

    let (status, _) = send(app, get("/api/logs/9999?user_id=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let (app, pool) = create_test_app().await;
    seed(&pool, 1, "apple", "food", 0.5, 1).await;
    seed(&pool, 1, "bread", "food", 0.25, 2).await;
    seed(&pool, 1, "bottle", "recyclable", 0.25, 9).await;

    let (status, json) = send(app, get("/api/dashboard?user_id=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_items"], 3);
    assert_eq!(json["total_co2_saved"], 1.0);
    assert_eq!(json["category_counts"]["food"], 2);
    assert_eq!(json["category_counts"]["recyclable"], 1);
    assert_eq!(json["recent_logs"].as_array().unwrap().len(), 3);

    let trend = json["weekly_trend"].as_array().unwrap();
    assert_eq!(trend.len(), 4);
    assert_eq!(trend[3]["week"], "Week 4");
    assert_eq!(trend[3]["items"], 2);
    assert_eq!(trend[2]["items"], 1);
}

#[tokio::test]
async fn test_weekly_stats_default_and_clamp() {
    let (app, pool) = create_test_app().await;
    seed(&pool, 1, "apple", "food", 0.5, 20).await;

    let (status, json) = send(app.clone(), get("/api/weekly-stats?user_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    let weeks = json.as_array().unwrap();
    assert_eq!(weeks.len(), 8);
    assert_eq!(weeks[0]["week"], "Week 1");
    assert_eq!(weeks.iter().map(|w| w["items"].as_u64().unwrap()).sum::<u64>(), 1);

    let (_, json) = send(app, get("/api/weekly-stats?user_id=1&weeks=500")).await;
    assert_eq!(json.as_array().unwrap().len(), 52);
}

#[tokio::test]
async fn test_category_breakdown() {
    let (app, pool) = create_test_app().await;
    seed(&pool, 3, "can", "recyclable", 0.25, 0).await;
    seed(&pool, 3, "jar", "recyclable", 0.25, 0).await;
    seed(&pool, 3, "sock", "other", 0.25, 0).await;

    let (status, json) = send(app, get("/api/category-breakdown?user_id=3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"other": 1, "recyclable": 2}));
}
