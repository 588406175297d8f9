use super::error::ApiError;
use crate::app::AppServices;
use crate::domain::model::AdjustedBalance;
use crate::utils::error::ComplianceError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipYearQuery {
    pub ship_id: Option<String>,
    pub year: Option<i32>,
}

impl ShipYearQuery {
    fn required(self) -> Result<(String, i32), ApiError> {
        match (self.ship_id, self.year) {
            (Some(ship_id), Some(year)) if !ship_id.trim().is_empty() => Ok((ship_id, year)),
            _ => Err(ComplianceError::validation("Missing shipId or year").into()),
        }
    }
}

pub async fn compute_cb(
    State(services): State<AppServices>,
    query: Result<Query<ShipYearQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let (ship_id, year) = query.required()?;

    let record = services.compliance.compute(&ship_id, year).await?;
    Ok(Json(json!({
        "message": "Compliance Balance computed successfully",
        "data": record,
    })))
}

pub async fn adjusted_cb(
    State(services): State<AppServices>,
    query: Result<Query<ShipYearQuery>, QueryRejection>,
) -> Result<Json<AdjustedBalance>, ApiError> {
    let Query(query) = query?;
    let (ship_id, year) = query.required()?;

    Ok(Json(services.compliance.adjusted(&ship_id, year).await?))
}
