use super::error::ApiError;
use crate::app::AppServices;
use crate::domain::model::{PoolId, PoolMemberRef, PoolRequest, PoolResult, StoredPool};
use crate::utils::error::ComplianceError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePoolBody {
    pub year: Option<i32>,
    pub members: Option<Vec<PoolMemberRef>>,
}

#[derive(Debug, Serialize)]
pub struct CreatePoolResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub pool: PoolResult,
}

pub async fn create_pool(
    State(services): State<AppServices>,
    body: Result<Json<CreatePoolBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePoolResponse>), ApiError> {
    let Json(body) = body?;
    let (Some(year), Some(members)) = (body.year, body.members) else {
        return Err(ComplianceError::validation("Missing or invalid parameters").into());
    };

    let pool = services
        .pooling
        .create(&PoolRequest { year, members })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatePoolResponse {
            message: "Pool created successfully",
            pool,
        }),
    ))
}

pub async fn get_pool(
    State(services): State<AppServices>,
    id: Result<Path<PoolId>, PathRejection>,
) -> Result<Json<StoredPool>, ApiError> {
    let Path(id) = id?;
    Ok(Json(services.pooling.find(id).await?))
}
