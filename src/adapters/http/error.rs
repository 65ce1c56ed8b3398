//! Conversion of domain errors into HTTP responses.
//!
//! Every route handler returns `Result<_, ApiError>`. The body is always
//! `{"error": message, "code": CODE}` except for ML proxy failures, which
//! answer `{"error", "details"}` with the status the ML service returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::handlers::ml::{UPSTREAM_BODY_DETAIL, UPSTREAM_STATUS_DETAIL};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, message))
    }

    pub fn status(&self) -> StatusCode {
        if let Some(status) = self
            .0
            .details
            .get(UPSTREAM_STATUS_DETAIL)
            .and_then(|s| s.parse::<u16>().ok())
            .and_then(|s| StatusCode::from_u16(s).ok())
        {
            return status;
        }
        status_for(self.0.code)
    }
}

/// HTTP status for each error category.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::PaymentFailed
        | ErrorCode::ExternalService
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                code = %self.0.code,
                status = status.as_u16(),
                error = %self.0.message,
                "Request failed"
            );
        }

        if let Some(details) = self.0.details.get(UPSTREAM_BODY_DETAIL) {
            let body = serde_json::json!({
                "error": self.0.message,
                "details": details,
            });
            return (status, Json(body)).into_response();
        }

        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message);
        (status, Json(body)).into_response()
    }
}
