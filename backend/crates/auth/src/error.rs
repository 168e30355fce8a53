//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message for requests without a usable session
pub const MSG_LOGIN_REQUIRED: &str = "ログインが必要です";
/// Message for authenticated non-admins on admin routes
pub const MSG_ADMIN_REQUIRED: &str = "管理者権限が必要です";
/// Message for failures while looking up the session
pub const MSG_AUTH_FAILED: &str = "認証処理中にエラーが発生しました";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session cookie on the request
    #[error("Session cookie missing")]
    Unauthenticated,

    /// Token malformed, signature mismatch, unknown or expired session
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Valid session without the admin role
    #[error("Admin role required")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated | AuthError::SessionInvalid | AuthError::Forbidden => {
                StatusCode::FORBIDDEN
            }
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthenticated | AuthError::SessionInvalid | AuthError::Forbidden => {
                ErrorKind::Forbidden
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Every gate rejection is 403; the message tells a missing session
    /// apart from a missing role. Raw database text never reaches the
    /// client; `details` carries the kernel's summary and the full error
    /// rides along as the source for the log.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Unauthenticated | AuthError::SessionInvalid => {
                AppError::forbidden(MSG_LOGIN_REQUIRED)
            }
            AuthError::Forbidden => AppError::forbidden(MSG_ADMIN_REQUIRED),
            AuthError::Database(e) => {
                let summary = AppError::from(e);
                let details = summary.message().to_string();
                AppError::internal(MSG_AUTH_FAILED)
                    .with_details(details)
                    .with_source(summary)
            }
            err @ AuthError::Internal(_) => AppError::internal(MSG_AUTH_FAILED).with_source(err),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.into_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.into_app_error()
    }
}
