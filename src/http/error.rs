//! HTTP error taxonomy and response mapping.

use crate::board::domain::Task;
use crate::board::services::{AuditError, TaskMutationError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// API-level error, mapped onto a status code and JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Caller input was rejected; never retried automatically.
    Validation(String),
    /// The addressed resource does not exist.
    NotFound(String),
    /// The caller's version was stale; carries the authoritative
    /// server record for explicit resolution and resubmission.
    Conflict {
        /// Human-readable conflict message.
        message: String,
        /// The task as currently stored.
        server_task: Box<Task>,
    },
    /// No authenticated identity on the request.
    Unauthorized,
    /// Unexpected failure; detail is logged server-side and the
    /// response body stays opaque.
    Internal(String),
}

impl ApiError {
    /// Wraps an unexpected failure, keeping its detail for the server
    /// log only.
    #[must_use]
    pub fn internal(detail: impl ToString) -> Self {
        Self::Internal(detail.to_string())
    }

    /// Returns the response status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskMutationError> for ApiError {
    fn from(err: TaskMutationError) -> Self {
        match err {
            TaskMutationError::Domain(_) => {
                Self::Validation("Invalid or forbidden task title.".to_owned())
            }
            TaskMutationError::DuplicateTitle(_) => {
                Self::Validation("Task title must be unique.".to_owned())
            }
            TaskMutationError::NotFound(_) => Self::NotFound("Task not found.".to_owned()),
            TaskMutationError::Conflict { server } => Self::Conflict {
                message: "Task version conflict.".to_owned(),
                server_task: server,
            },
            TaskMutationError::NoEligibleUsers => {
                Self::Validation("No users available for assignment.".to_owned())
            }
            TaskMutationError::Storage(storage) => Self::internal(storage),
            TaskMutationError::Assignment(assignment) => Self::internal(assignment),
        }
    }
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(message) | Self::NotFound(message) => json!({ "message": message }),
            Self::Conflict {
                message,
                server_task,
            } => json!({ "message": message, "serverTask": server_task }),
            Self::Unauthorized => json!({ "message": "Authentication required." }),
            Self::Internal(detail) => {
                error!(detail = %detail, "request failed with server error");
                json!({ "message": "Server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
