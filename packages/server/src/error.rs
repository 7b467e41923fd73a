use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::periods::PeriodError;
use crate::workflow::WorkflowError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `ACTOR_MISSING`,
    /// `NOT_FOUND`, `INVALID_TRANSITION`, `MISSING_REASON`,
    /// `CONCURRENT_MODIFICATION`, `STORE_UNAVAILABLE`.
    #[schema(example = "MISSING_REASON")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "A reason is required to reject")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    ActorMissing,
    NotFound(String),
    InvalidTransition(String),
    MissingReason(String),
    ConcurrentModification(String),
    StoreUnavailable(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::ActorMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "ACTOR_MISSING",
                    message: "X-Actor-Id header is required".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::InvalidTransition(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "INVALID_TRANSITION",
                    message: msg,
                },
            ),
            AppError::MissingReason(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "MISSING_REASON",
                    message: msg,
                },
            ),
            AppError::ConcurrentModification(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONCURRENT_MODIFICATION",
                    message: msg,
                },
            ),
            AppError::StoreUnavailable(detail) => {
                tracing::error!("Store unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "STORE_UNAVAILABLE",
                        message: "Submission store is unavailable, try again later".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// User-facing message for a workflow error, shared by single and bulk
/// responses.
pub fn workflow_message(err: &WorkflowError) -> String {
    match err {
        WorkflowError::NotFound(id) => format!("Submission '{id}' not found, please refresh"),
        WorkflowError::InvalidTransition { from, trigger } => {
            format!("Cannot {trigger} a submission that is already {from}")
        }
        WorkflowError::MissingReason { trigger } => {
            format!("A reason is required to {}", trigger.as_str().replace('_', " "))
        }
        WorkflowError::ConcurrentModification(_) => {
            "Submission was changed by someone else, please refresh and retry".into()
        }
        WorkflowError::StoreUnavailable(detail) => detail.clone(),
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = workflow_message(&err);
        match err {
            WorkflowError::NotFound(_) => AppError::NotFound(message),
            WorkflowError::InvalidTransition { .. } => AppError::InvalidTransition(message),
            WorkflowError::MissingReason { .. } => AppError::MissingReason(message),
            WorkflowError::ConcurrentModification(_) => AppError::ConcurrentModification(message),
            WorkflowError::StoreUnavailable(_) => AppError::StoreUnavailable(message),
        }
    }
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::NoCurrentPeriod => AppError::NotFound(err.to_string()),
            PeriodError::Database(e) => AppError::StoreUnavailable(e.to_string()),
        }
    }
}
