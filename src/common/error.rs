// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

use super::validation::ValidationResult;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// One or more reservation rules failed; `errors` keeps the full ordered list.
    ValidationFailed {
        primary: String,
        errors: Vec<String>,
    },
    PayloadTooLarge(usize),
    MalformedBody(String),
    BodyRead(String),
    InvalidPath,
    MethodNotAllowed,
    NotFound,
    ReadError(std::io::Error),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationFailed { primary, errors } => {
                write!(f, "Validation failed ({} errors): {}", errors.len(), primary)
            }
            ApiError::PayloadTooLarge(limit) => {
                write!(f, "Payload Too Large: body exceeds {} bytes", limit)
            }
            ApiError::MalformedBody(msg) => write!(f, "Malformed Body: {}", msg),
            ApiError::BodyRead(msg) => write!(f, "Body Read Error: {}", msg),
            ApiError::InvalidPath => write!(f, "Invalid Path"),
            ApiError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            ApiError::NotFound => write!(f, "Not Found"),
            ApiError::ReadError(e) => write!(f, "Read Error: {}", e),
            ApiError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed { .. }
            | ApiError::MalformedBody(_)
            | ApiError::BodyRead(_)
            | ApiError::InvalidPath => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ReadError(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let (error_message, code, errors) = match self {
            ApiError::ValidationFailed { primary, errors } => {
                (primary, "VALIDATION_FAILED", Some(errors))
            }
            ApiError::PayloadTooLarge(_) => (
                "Request body too large.".to_string(),
                "PAYLOAD_TOO_LARGE",
                None,
            ),
            ApiError::MalformedBody(msg) => {
                warn!(error = %msg, "Rejected malformed request body");
                (
                    "Request body could not be parsed.".to_string(),
                    "MALFORMED_BODY",
                    None,
                )
            }
            ApiError::BodyRead(msg) => {
                warn!(error = %msg, "Request body read aborted");
                (
                    "Request body could not be read.".to_string(),
                    "BODY_READ_ERROR",
                    None,
                )
            }
            ApiError::InvalidPath => ("Invalid path.".to_string(), "INVALID_PATH", None),
            ApiError::MethodNotAllowed => (
                "Method not allowed.".to_string(),
                "METHOD_NOT_ALLOWED",
                None,
            ),
            ApiError::NotFound => ("Not found.".to_string(), "NOT_FOUND", None),
            ApiError::ReadError(e) => {
                error!(error = %e, "Static file read failed");
                ("Could not read file.".to_string(), "READ_ERROR", None)
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "Unexpected failure while handling request");
                (
                    "Server error while processing reservation request.".to_string(),
                    "INTERNAL_SERVER_ERROR",
                    None,
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
            errors,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Converts a failed ValidationResult into the client-facing error.
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        match result.primary_message() {
            Some(primary) => ApiError::ValidationFailed {
                primary: primary.to_string(),
                errors: result.messages(),
            },
            None => ApiError::Internal(
                "Validation result was valid but converted to error".to_string(),
            ),
        }
    }
}
