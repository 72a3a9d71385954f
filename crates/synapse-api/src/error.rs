//! API error types and JSON error response formatting.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use synapse_core::error::SynapseError;
use synapse_script::ScriptError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "not_found").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 Bad Request - malformed parameters.
    #[error("{0}")]
    BadRequest(String),
    /// 404 Not Found - unknown session.
    #[error("{0}")]
    NotFound(String),
    /// 409 Conflict - the session moved on while the request was in flight.
    #[error("{0}")]
    Conflict(String),
    /// 422 Unprocessable Entity - the session cannot accept this request now.
    #[error("{0}")]
    UnprocessableEntity(String),
    /// 500 Internal Server Error.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_started() -> Self {
        ApiError::NotFound("Script not started".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity", msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal API error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::UnprocessableEntity(message),
            _ => ApiError::BadRequest(message),
        }
    }
}

impl From<ScriptError> for ApiError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::AnswerRequired => ApiError::UnprocessableEntity(err.to_string()),
        }
    }
}

impl From<SynapseError> for ApiError {
    fn from(err: SynapseError) -> Self {
        match err {
            SynapseError::Config(msg) => ApiError::BadRequest(msg),
            SynapseError::Script(msg) => ApiError::UnprocessableEntity(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::not_started(), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ApiError::UnprocessableEntity("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_script_error_maps_to_422() {
        let err: ApiError = ScriptError::AnswerRequired.into();
        assert!(matches!(err, ApiError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_synapse_error_mapping() {
        let err: ApiError = SynapseError::Config("bad".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
        let err: ApiError = SynapseError::Api("boom".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
