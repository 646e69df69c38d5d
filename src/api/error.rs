/// API error type
///
/// Every handler failure funnels through [`ApiError`], which renders a
/// `{"message": "..."}` body with the matching status code.

use crate::portfolio::ValidationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("No file uploaded")]
    NoFile,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NoFile => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Internal(cause) = &self {
            tracing::error!("❌ Request failed: {:#}", cause);
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

/// Parse a numeric `:id` path segment
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("Invalid id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_kind() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("gone".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("disk on fire")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_cause_is_not_echoed() {
        let err = ApiError::Internal(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(ApiError::Validation(_))));
    }
}
