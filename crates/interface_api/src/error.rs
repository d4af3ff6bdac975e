//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_ledger::{LedgerError, ServiceError};
use domain_roster::RosterError;
use domain_settlement::SettlementError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::TripNotFound(id) => ApiError::NotFound(format!("Trip not found: {}", id)),
            ServiceError::Ledger(e) => e.into(),
            ServiceError::Archive(e) => {
                error!(error = %e, "archive failure while serving request");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        if err.is_validation() {
            return ApiError::Validation(err.to_string());
        }
        match err {
            LedgerError::NotFound(_) | LedgerError::Roster(RosterError::NotFound(_)) => {
                ApiError::NotFound(err.to_string())
            }
            LedgerError::AlreadyVoided(_) | LedgerError::Roster(RosterError::DuplicateId(_)) => {
                ApiError::Conflict(err.to_string())
            }
            // Arithmetic failures during derivation indicate corrupted
            // records, not caller mistakes.
            other => {
                error!(error = %other, "internal ledger failure");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        // Never a caller mistake: the solver only rejects sheets the
        // calculator should not have produced.
        error!(error = %err, "settlement solver failure");
        ApiError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
