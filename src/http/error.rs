//! Mapping of service failures to HTTP responses.

use crate::persistence::ports::RepositoryError;
use crate::task::{
    domain::{TaskDomainError, TaskId},
    services::TaskServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
}

/// Failures returned by task handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request content violated a domain rule.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// No task has the requested identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// Storage failed while serving the request.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => Self::Domain(domain),
            TaskServiceError::Repository(repository) => Self::Repository(repository),
        }
    }
}

impl ApiError {
    /// Returns the response status for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Domain(err) => tracing::warn!(error = %err, "rejected task request"),
            Self::NotFound(id) => tracing::debug!(task_id = %id, "task not found"),
            Self::Repository(err) => tracing::error!(error = %err, "task storage failed"),
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
