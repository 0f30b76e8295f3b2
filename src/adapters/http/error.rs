//! Error responses shared by every HTTP module.
//!
//! Domain error codes map onto status codes here, once, so each module's
//! handlers only need `?`.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::handlers::{FillingError, FormError};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Set when the same request may succeed later.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn from_domain(err: &DomainError) -> Self {
        let details = (!err.details.is_empty()).then(|| {
            serde_json::Value::Object(
                err.details
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            )
        });

        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details,
            retryable: err.is_retryable(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path or body, rejected before reaching a handler.
    BadRequest(String),
    Domain(DomainError),
}

/// Status code for each domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::LastSectionRequired
        | ErrorCode::MinimumOptionsRequired
        | ErrorCode::OptionsNotEditable
        | ErrorCode::IncompleteQuestions
        | ErrorCode::InvalidJumpTarget
        | ErrorCode::InvalidStructure => StatusCode::BAD_REQUEST,

        ErrorCode::FormNotFound
        | ErrorCode::SectionNotFound
        | ErrorCode::QuestionNotFound
        | ErrorCode::OptionNotFound
        | ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,

        ErrorCode::NoNextSection
        | ErrorCode::QuestionNotInSection
        | ErrorCode::SessionSubmitted
        | ErrorCode::SubmissionInProgress
        | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,

        ErrorCode::FormClosed => StatusCode::GONE,

        ErrorCode::SectionIncomplete | ErrorCode::FormIncomplete => {
            StatusCode::UNPROCESSABLE_ENTITY
        }

        ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<FillingError> for ApiError {
    fn from(err: FillingError) -> Self {
        match err {
            FillingError::SessionNotFound(id) => ApiError::Domain(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Filling session not found: {}", id),
            )),
            FillingError::Domain(e) => ApiError::Domain(e),
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::NotFound(id) => ApiError::Domain(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", id),
            )),
            FormError::Domain(e) => ApiError::Domain(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::Domain(err) => {
                let status = status_for(err.code);
                if status.is_server_error() {
                    tracing::warn!(code = %err.code, error = %err, "Request failed upstream");
                }
                (status, ErrorResponse::from_domain(&err))
            }
        };

        (status, Json(error)).into_response()
    }
}
