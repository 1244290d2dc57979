//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use mathdrill_core::QuizError;

/// Errors returned from API handlers as `{"error": "..."}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    /// Question generation failed upstream.
    #[error("Unable to generate questions: {0}")]
    Generation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::SessionNotFound(_) => ApiError::NotFound,
            QuizError::Generation(e) => ApiError::Generation(format!("{e:#}")),
            QuizError::Store(e) => ApiError::Internal(format!("{e:#}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
