//! Mapping from repository errors to HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use todo_core::TodoError;

/// Handler error. Every failure leaves the service through this type, so the
/// status code table lives in exactly one place.
#[derive(Debug)]
pub struct ApiError(pub TodoError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            TodoError::Validation(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            TodoError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.0 {
            TodoError::Persistence(_) => tracing::error!(error = %self.0, "request failed"),
            TodoError::Validation(_) => tracing::warn!(error = %self.0, "rejected request"),
            TodoError::NotFound(_) => tracing::debug!(error = %self.0, "not found"),
        }
        (status, self.0.to_string()).into_response()
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        ApiError(e)
    }
}

// axum answers some body failures with 415/422; all of them are 400 here.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(TodoError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(TodoError::Validation(rejection.body_text()))
    }
}
