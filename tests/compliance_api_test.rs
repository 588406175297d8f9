use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fueleu_compliance::adapters::http::{router, HEALTH_BANNER};
use fueleu_compliance::adapters::seed::{read_routes, seed_routes};
use fueleu_compliance::{AppServices, InMemoryRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const ROUTES: &str = "\
route_id,vessel_type,fuel_type,year,ghg_intensity,fuel_consumption,distance,total_emissions
R001,Container,HFO,2024,91.0,5000,12000,4500
R002,BulkCarrier,LNG,2024,88.0,4800,11500,4200
R003,Tanker,MGO,2024,93.5,5100,12500,4700
";

async fn seeded_app() -> Router {
    let repo = Arc::new(InMemoryRepository::new());
    let routes = read_routes(ROUTES.as_bytes()).unwrap();
    seed_routes(repo.as_ref(), &routes).await.unwrap();
    router(AppServices::new(repo), Duration::from_secs(5))
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
async fn test_health_banner() {
    let app = seeded_app().await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], HEALTH_BANNER.as_bytes());
}

#[tokio::test]
async fn test_list_routes() {
    let app = seeded_app().await;
    let (status, body) = send(&app, "GET", "/routes", None).await;

    assert_eq!(status, StatusCode::OK);
    let routes = body.as_array().unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0]["routeId"], "R001");
    assert_eq!(routes[0]["ghgIntensity"], 91.0);
    assert_eq!(routes[0]["isBaseline"], false);
}

#[tokio::test]
async fn test_baseline_and_comparison() {
    let app = seeded_app().await;

    let (status, _) = send(&app, "GET", "/routes/comparison", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/routes/1/baseline", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Route R001 set as baseline.");

    let (status, body) = send(&app, "GET", "/routes/comparison", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["baseline"], "R001");
    assert_eq!(body["baselineIntensity"], 91.0);
    let comparisons = body["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0]["routeId"], "R002");
    assert_eq!(comparisons[0]["percentDiff"], -3.3);
    assert_eq!(comparisons[0]["compliant"], true);
    assert_eq!(comparisons[1]["percentDiff"], 2.75);
    assert_eq!(comparisons[1]["compliant"], false);

    let (status, body) = send(&app, "POST", "/routes/99/baseline", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_compute_compliance_balance() {
    let app = seeded_app().await;

    let (status, body) = send(&app, "GET", "/compliance/cb?shipId=R002&year=2024", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Compliance Balance computed successfully");
    assert_eq!(body["data"]["shipId"], "R002");
    assert_eq!(body["data"]["year"], 2024);
    let cb = body["data"]["cbGco2eq"].as_f64().unwrap();
    let expected = (89.3368 - 88.0) * 4800.0 * 41000.0;
    assert!((cb - expected).abs() < 1e-3);

    let (status, _) = send(&app, "GET", "/compliance/cb?shipId=R002", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/compliance/cb?shipId=R002&year=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/compliance/cb?shipId=R002&year=2025", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_banking_flow() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/compliance/banking/bank",
        Some(json!({ "shipId": "R002", "year": 2024, "amount": 1000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Surplus banked successfully");
    assert_eq!(body["record"]["amountGco2eq"], 1000.0);

    let (status, body) = send(
        &app,
        "POST",
        "/compliance/banking/apply",
        Some(json!({ "shipId": "R002", "year": 2024, "amount": 400.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], 400.0);
    assert_eq!(body["remaining"], 600.0);

    let (status, body) = send(
        &app,
        "POST",
        "/compliance/banking/apply",
        Some(json!({ "shipId": "R002", "year": 2024, "amount": 601.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Insufficient banked balance"));

    let (status, _) = send(
        &app,
        "POST",
        "/compliance/banking/bank",
        Some(json!({ "shipId": "R002", "year": 2024 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "GET",
        "/compliance/banking/records?shipId=R002&year=2024",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["amountGco2eq"], -400.0);

    let (_, body) = send(&app, "GET", "/compliance/banking/records?shipId=R001", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_adjusted_balance_includes_banked() {
    let app = seeded_app().await;

    let (status, _) = send(&app, "GET", "/compliance/adjusted-cb?shipId=R001&year=2024", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "GET", "/compliance/cb?shipId=R001&year=2024", None).await;
    send(
        &app,
        "POST",
        "/compliance/banking/bank",
        Some(json!({ "shipId": "R001", "year": 2024, "amount": 250.0 })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/compliance/adjusted-cb?shipId=R001&year=2024", None).await;
    assert_eq!(status, StatusCode::OK);
    let cb = body["cbGco2eq"].as_f64().unwrap();
    assert!(cb < 0.0);
    assert_eq!(body["banked"], 250.0);
    assert_eq!(body["adjustedCb"].as_f64().unwrap(), cb + 250.0);
}
