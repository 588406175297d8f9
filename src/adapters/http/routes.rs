use super::error::ApiError;
use crate::app::AppServices;
use crate::domain::model::{ComparisonReport, Route};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

pub async fn list_routes(
    State(services): State<AppServices>,
) -> Result<Json<Vec<Route>>, ApiError> {
    Ok(Json(services.routes.list().await?))
}

pub async fn set_baseline(
    State(services): State<AppServices>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let route = services.routes.set_baseline(id).await?;
    Ok(Json(json!({
        "message": format!("Route {} set as baseline.", route.route_id)
    })))
}

pub async fn compare_routes(
    State(services): State<AppServices>,
) -> Result<Json<ComparisonReport>, ApiError> {
    Ok(Json(services.routes.compare().await?))
}
