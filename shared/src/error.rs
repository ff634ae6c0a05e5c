//! Errors raised while turning an inbound request into engine input

use thiserror::Error;

/// Client-side request problems. Upstream and configuration failures live in the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date in {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },
}

impl RequestError {
    /// Name of the offending request field
    pub fn field(&self) -> &str {
        match self {
            RequestError::MissingField(field) => field,
            RequestError::InvalidDate { field, .. } => field,
            RequestError::Validation { field, .. } => field,
        }
    }
}
