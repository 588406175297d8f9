use crate::utils::error::{ComplianceError, ErrorCategory};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Maps domain errors onto HTTP responses shaped as `{ "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub ComplianceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Storage | ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ComplianceError> for ApiError {
    fn from(err: ComplianceError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ComplianceError::validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ComplianceError::validation(format!(
            "Invalid query parameters: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(ComplianceError::validation(format!(
            "Invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                "Request failed: {} (category: {:?}, severity: {:?})",
                self.0,
                self.0.category(),
                self.0.severity()
            );
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self.0);
        }

        let body = serde_json::json!({ "message": self.0.user_friendly_message() });
        (status, Json(body)).into_response()
    }
}
