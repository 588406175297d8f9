pub mod banking;
pub mod compliance;
pub mod error;
pub mod pooling;
pub mod routes;

use crate::app::AppServices;
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

pub const HEALTH_BANNER: &str = "FuelEU Maritime Backend is running";

async fn health() -> &'static str {
    HEALTH_BANNER
}

pub fn router(services: AppServices, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/routes", get(routes::list_routes))
        .route("/routes/comparison", get(routes::compare_routes))
        .route("/routes/{id}/baseline", post(routes::set_baseline))
        .route("/compliance/cb", get(compliance::compute_cb))
        .route("/compliance/adjusted-cb", get(compliance::adjusted_cb))
        .route("/compliance/banking/bank", post(banking::bank_surplus))
        .route("/compliance/banking/apply", post(banking::apply_banked))
        .route("/compliance/banking/records", get(banking::banking_records))
        .route("/pools", post(pooling::create_pool))
        .route("/pools/{id}", get(pooling::get_pool))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        // the dashboard is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(services)
}
