//! Service error types with HTTP status code mapping.
//!
//! [`MonitorError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::source::SourceError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid email address: not-an-email",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`MonitorError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server/Upstream | 500 / 502                  |
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The supplied email address failed validation.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The email is not in the monitored set.
    #[error("email is not monitored: {0}")]
    MonitoredNotFound(String),

    /// Both the primary and fallback breach sources failed.
    #[error("breach source unavailable: {0}")]
    Source(#[from] SourceError),

    /// Result, alert, or monitored-email store failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Outbound alert email could not be delivered.
    #[error("alert dispatch failed: {0}")]
    Dispatch(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidEmail(_) => 1001,
            Self::MonitoredNotFound(_) => 2001,
            Self::Persistence(_) => 3001,
            Self::Source(_) => 3002,
            Self::Dispatch(_) => 3003,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::MonitoredNotFound(_) => StatusCode::NOT_FOUND,
            Self::Source(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) | Self::Dispatch(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for MonitorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_maps_to_bad_request() {
        let err = MonitorError::InvalidEmail("nope".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn monitored_not_found_maps_to_not_found() {
        let err = MonitorError::MonitoredNotFound("a@b.io".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn persistence_maps_to_internal_server_error() {
        let err = MonitorError::Persistence("connection reset".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), 3001);
    }

    #[test]
    fn source_maps_to_bad_gateway() {
        let err = MonitorError::Source(SourceError::Unavailable("timeout".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), 3002);
    }
}
