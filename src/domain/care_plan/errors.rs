//! Care plan error types.

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, PlanId, ValidationError};

/// Care plan errors surfaced by the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarePlanError {
    /// Entry was not found.
    NotFound(EntryId),
    /// Life care plan was not found.
    PlanNotFound(PlanId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CarePlanError {
    pub fn not_found(id: EntryId) -> Self {
        CarePlanError::NotFound(id)
    }
    pub fn plan_not_found(id: PlanId) -> Self {
        CarePlanError::PlanNotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CarePlanError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CarePlanError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CarePlanError::NotFound(_) => ErrorCode::EntryNotFound,
            CarePlanError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            CarePlanError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CarePlanError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CarePlanError::NotFound(id) => format!("Care plan entry not found: {}", id),
            CarePlanError::PlanNotFound(id) => format!("Life care plan not found: {}", id),
            CarePlanError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CarePlanError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CarePlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CarePlanError {}

impl From<DomainError> for CarePlanError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CarePlanError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CarePlanError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for CarePlanError {
    fn from(err: ValidationError) -> Self {
        CarePlanError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
