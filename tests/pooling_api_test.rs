use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fueleu_compliance::adapters::http::router;
use fueleu_compliance::core::ComplianceStore;
use fueleu_compliance::domain::model::ComplianceRecord;
use fueleu_compliance::{AppServices, InMemoryRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn app_with_balances(balances: &[(&str, i32, f64)]) -> (Arc<InMemoryRepository>, Router) {
    let repo = Arc::new(InMemoryRepository::new());
    for (ship, year, cb) in balances {
        repo.upsert_cb(&ComplianceRecord::new(*ship, *year, *cb))
            .await
            .unwrap();
    }
    let app = router(AppServices::new(repo.clone()), Duration::from_secs(5));
    (repo, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_create_pool_reallocates_surplus() {
    let (_, app) = app_with_balances(&[("A", 2025, 100.0), ("B", 2025, -40.0), ("C", 2025, -30.0)]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/pools",
        Some(json!({ "year": 2025, "members": [{ "shipId": "B" }, { "shipId": "A" }, { "shipId": "C" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Pool created successfully");
    assert_eq!(body["totalCB"], 30.0);
    assert!(body["poolId"].is_i64());

    let members = body["members"].as_array().unwrap();
    let ships: Vec<&str> = members.iter().map(|m| m["shipId"].as_str().unwrap()).collect();
    assert_eq!(ships, vec!["A", "C", "B"]);
    assert_eq!(members[0]["cbBefore"], 100.0);
    assert_eq!(members[0]["cbAfter"], 30.0);
    assert_eq!(members[1]["cbAfter"], 0.0);
    assert_eq!(members[2]["cbBefore"], -40.0);
    assert_eq!(members[2]["cbAfter"], 0.0);
}

#[tokio::test]
async fn test_negative_pool_total_is_rejected() {
    let (repo, app) = app_with_balances(&[("A", 2025, 10.0), ("B", 2025, -40.0)]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/pools",
        Some(json!({ "year": 2025, "members": [{ "shipId": "A" }, { "shipId": "B" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Total CB must be >= 0"));
    assert_eq!(repo.pool_count().await, 0);
}

#[tokio::test]
async fn test_member_without_data_is_rejected() {
    let (repo, app) = app_with_balances(&[("A", 2025, 10.0)]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/pools",
        Some(json!({ "year": 2025, "members": [{ "shipId": "A" }, { "shipId": "R999" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("R999"));
    assert_eq!(repo.pool_count().await, 0);
}

#[tokio::test]
async fn test_malformed_pool_requests_are_bad_requests() {
    let (repo, app) = app_with_balances(&[("A", 2025, 10.0)]).await;

    let cases = [
        json!({ "members": [{ "shipId": "A" }] }),
        json!({ "year": 2025 }),
        json!({ "year": 2025, "members": "A" }),
        json!({ "year": 2025, "members": [] }),
        json!({ "year": 2025, "members": [{ "ship": "A" }] }),
        json!({ "year": 2025, "members": [{ "shipId": "A" }, { "shipId": "A" }] }),
    ];

    for case in cases {
        let (status, body) = send(&app, "POST", "/pools", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "request: {case}");
        assert!(body["message"].is_string(), "request: {case}");
    }
    assert_eq!(repo.pool_count().await, 0);
}

#[tokio::test]
async fn test_pool_can_be_read_back() {
    let (_, app) = app_with_balances(&[("A", 2025, 20.0), ("B", 2025, -5.0), ("C", 2025, -5.0)]).await;

    let (_, created) = send(
        &app,
        "POST",
        "/pools",
        Some(json!({ "year": 2025, "members": [{ "shipId": "A" }, { "shipId": "B" }, { "shipId": "C" }] })),
    )
    .await;
    let pool_id = created["poolId"].as_i64().unwrap();

    let (status, stored) = send(&app, "GET", &format!("/pools/{pool_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["poolId"], pool_id);
    assert_eq!(stored["year"], 2025);
    assert_eq!(stored["totalCB"], 10.0);
    assert_eq!(stored["members"], created["members"]);
    assert!(stored["createdAt"].is_string());

    let (status, _) = send(&app, "GET", "/pools/424242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/pools/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
