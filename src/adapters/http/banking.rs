use super::error::ApiError;
use crate::app::AppServices;
use crate::domain::model::{BankEntry, BankFilter};
use crate::utils::error::ComplianceError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingRequest {
    pub ship_id: Option<String>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
}

impl BankingRequest {
    fn required(self) -> Result<(String, i32, f64), ApiError> {
        match (self.ship_id, self.year, self.amount) {
            (Some(ship_id), Some(year), Some(amount)) => Ok((ship_id, year, amount)),
            _ => Err(ComplianceError::validation("Missing parameters").into()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsQuery {
    pub ship_id: Option<String>,
    pub year: Option<i32>,
}

pub async fn bank_surplus(
    State(services): State<AppServices>,
    body: Result<Json<BankingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(body) = body?;
    let (ship_id, year, amount) = body.required()?;

    let record = services.banking.bank(&ship_id, year, amount).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Surplus banked successfully",
            "record": record,
        })),
    ))
}

pub async fn apply_banked(
    State(services): State<AppServices>,
    body: Result<Json<BankingRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let (ship_id, year, amount) = body.required()?;

    let outcome = services.banking.apply(&ship_id, year, amount).await?;
    Ok(Json(json!({
        "message": "Banked balance applied successfully",
        "applied": outcome.applied,
        "remaining": outcome.remaining,
    })))
}

pub async fn banking_records(
    State(services): State<AppServices>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> Result<Json<Vec<BankEntry>>, ApiError> {
    let Query(query) = query?;
    let filter = BankFilter {
        ship_id: query.ship_id.filter(|id| !id.is_empty()),
        year: query.year,
    };
    Ok(Json(services.banking.records(&filter).await?))
}
