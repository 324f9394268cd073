//! JSON error responses shared by all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::care_plan::CarePlanError;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: message.into(),
            details: Some(serde_json::json!({ "field": field })),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// 400 response for an unparseable path identifier.
pub fn invalid_id(kind: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {} ID", kind))),
    )
        .into_response()
}

/// Maps an application error to a response. Infrastructure details are
/// logged, never returned.
pub fn handle_care_plan_error(error: CarePlanError) -> Response {
    match error {
        CarePlanError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Care plan entry", &id.to_string())),
        )
            .into_response(),
        CarePlanError::PlanNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Life care plan", &id.to_string())),
        )
            .into_response(),
        CarePlanError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(&field, message)),
        )
            .into_response(),
        CarePlanError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An internal error occurred")),
            )
                .into_response()
        }
    }
}
