//! Error handling for the shelf-life prediction server
//!
//! Every failure is rendered as `{"error": {"code", "message", "field"?}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::RequestError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid date in {field}: {value}")]
    InvalidDate { field: String, value: String },

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // External service errors
    #[error("{service} unavailable: {details}")]
    UpstreamUnavailable {
        service: &'static str,
        details: String,
    },

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(service: &'static str, details: impl std::fmt::Display) -> Self {
        AppError::UpstreamUnavailable {
            service,
            details: details.to_string(),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::MissingField(field) => AppError::MissingField(field.to_string()),
            RequestError::InvalidDate { field, value } => AppError::InvalidDate {
                field: field.to_string(),
                value,
            },
            RequestError::Validation { field, message } => AppError::Validation { field, message },
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MISSING_FIELD".to_string(),
                    message: format!("{} is required", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidDate { field, value } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_DATE".to_string(),
                    message: format!("'{}' is not a valid date (expected YYYY-MM-DD)", value),
                    field: Some(field.clone()),
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::UpstreamUnavailable { service, .. } => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "UPSTREAM_UNAVAILABLE".to_string(),
                    message: format!("{} is temporarily unavailable", service),
                    field: None,
                },
            ),
            AppError::ConfigurationMissing(what) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_MISSING".to_string(),
                    message: format!("Server is missing configuration: {}", what),
                    field: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_conversion() {
        let err: AppError = RequestError::MissingField("city").into();
        assert!(matches!(err, AppError::MissingField(ref f) if f == "city"));

        let err: AppError = RequestError::InvalidDate {
            field: "expiryDate",
            value: "soon".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::InvalidDate { ref field, .. } if field == "expiryDate"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::MissingField("city".into()), StatusCode::BAD_REQUEST),
            (AppError::upstream("Weather service", "timeout"), StatusCode::BAD_GATEWAY),
            (
                AppError::ConfigurationMissing("weather.api_key".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
