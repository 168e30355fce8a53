//! Curriculum Error Types
//!
//! This module provides curriculum-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::Operation;

/// Curriculum-specific result type alias
pub type CurriculumResult<T> = Result<T, CurriculumError>;

pub const MSG_INVALID_INPUT: &str = "入力内容が不正です";
pub const MSG_COURSE_NOT_FOUND: &str = "指定されたコースが見つかりません";
pub const MSG_PROBLEM_NOT_FOUND: &str = "指定された問題が見つかりません";
pub const MSG_ANSWER_NOT_FOUND: &str = "指定された解答が見つかりません";
pub const MSG_UNEXPECTED: &str = "サーバーでエラーが発生しました";

/// Curriculum-specific error variants
#[derive(Debug, Error)]
pub enum CurriculumError {
    /// Path or body rejected before persistence; payload is field detail
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Course not found")]
    CourseNotFound,

    #[error("Problem not found")]
    ProblemNotFound,

    #[error("Answer not found")]
    AnswerNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Unexpected failure with the operation it interrupted
    #[error("{operation} failed: {source}")]
    Failed {
        operation: Operation,
        #[source]
        source: Box<CurriculumError>,
    },
}

impl CurriculumError {
    /// Attach operation context to unexpected failures.
    /// Expected outcomes (validation, not-found) pass through unchanged.
    pub fn during(self, operation: Operation) -> Self {
        match self {
            CurriculumError::Database(_) | CurriculumError::Internal(_) => {
                CurriculumError::Failed {
                    operation,
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CurriculumError::Validation(_) => StatusCode::BAD_REQUEST,
            CurriculumError::CourseNotFound
            | CurriculumError::ProblemNotFound
            | CurriculumError::AnswerNotFound => StatusCode::NOT_FOUND,
            CurriculumError::Database(_)
            | CurriculumError::Internal(_)
            | CurriculumError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CurriculumError::Validation(_) => ErrorKind::BadRequest,
            CurriculumError::CourseNotFound
            | CurriculumError::ProblemNotFound
            | CurriculumError::AnswerNotFound => ErrorKind::NotFound,
            CurriculumError::Database(_)
            | CurriculumError::Internal(_)
            | CurriculumError::Failed { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// 500s carry the operation's message and the kernel's short summary of
    /// the cause as `details`. The full cause is kept as the source, which
    /// only the log sees.
    pub fn into_app_error(self) -> AppError {
        match self {
            CurriculumError::Validation(detail) => {
                AppError::bad_request(MSG_INVALID_INPUT).with_details(detail)
            }
            CurriculumError::CourseNotFound => AppError::not_found(MSG_COURSE_NOT_FOUND),
            CurriculumError::ProblemNotFound => AppError::not_found(MSG_PROBLEM_NOT_FOUND),
            CurriculumError::AnswerNotFound => AppError::not_found(MSG_ANSWER_NOT_FOUND),
            CurriculumError::Failed { operation, source } => {
                let cause = source.into_cause();
                let details = cause.message().to_string();
                AppError::internal(operation.failure_message())
                    .with_details(details)
                    .with_source(cause)
            }
            other => {
                let cause = other.into_cause();
                let details = cause.message().to_string();
                AppError::internal(MSG_UNEXPECTED)
                    .with_details(details)
                    .with_source(cause)
            }
        }
    }

    /// Kernel error whose message is a bounded, client-safe description
    fn into_cause(self) -> AppError {
        match self {
            CurriculumError::Database(e) => AppError::from(e),
            CurriculumError::Failed { source, .. } => source.into_cause(),
            other => AppError::internal("Internal error").with_source(other),
        }
    }
}

impl From<CurriculumError> for AppError {
    fn from(err: CurriculumError) -> Self {
        err.into_app_error()
    }
}

impl IntoResponse for CurriculumError {
    fn into_response(self) -> Response {
        self.into_app_error().into_response()
    }
}

/// `.during(op)` on results
pub trait OperationContext<T> {
    fn during(self, operation: Operation) -> CurriculumResult<T>;
}

impl<T> OperationContext<T> for CurriculumResult<T> {
    fn during(self, operation: Operation) -> CurriculumResult<T> {
        self.map_err(|e| e.during(operation))
    }
}
