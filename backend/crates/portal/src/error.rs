//! Portal Error Types

use curriculum::endpoints::PathParamError;
use kernel::error::body::ErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

pub type PortalResult<T> = Result<T, PortalError>;

#[derive(Debug, Error)]
pub enum PortalError {
    /// Transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the endpoint's type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx answer from the API
    #[error("API error {status}: {}", body.error)]
    Api { status: StatusCode, body: ErrorBody },

    /// Path params did not fit an endpoint template
    #[error("Invalid path params for {endpoint}: {source}")]
    InvalidPath {
        endpoint: String,
        #[source]
        source: PathParamError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PortalError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PortalError::Api { status, .. } => Some(*status),
            PortalError::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    /// Text suitable for an inline form error
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Api { body, .. } => match &body.details {
                Some(details) => format!("{} ({})", body.error, details),
                None => body.error.clone(),
            },
            _ => "通信に失敗しました".to_string(),
        }
    }
}
