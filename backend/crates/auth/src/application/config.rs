//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::crypto::{from_base64url, random_key};

use crate::error::{AuthError, AuthResult};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_session".to_string(),
            session_secret: [0u8; 32],
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_key(),
            ..Default::default()
        }
    }

    /// Create config for development
    ///
    /// Tokens signed by a previous process stop verifying after a restart.
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Create config from a base64url encoded 32-byte secret
    pub fn from_base64url_secret(encoded: &str) -> AuthResult<Self> {
        let bytes = from_base64url(encoded.trim())
            .map_err(|e| AuthError::Internal(format!("Invalid session secret encoding: {e}")))?;
        let session_secret: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            AuthError::Internal(format!("Session secret must be 32 bytes, got {}", b.len()))
        })?;
        Ok(Self {
            session_secret,
            ..Default::default()
        })
    }

    /// Override the cookie name
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = name.into();
        self
    }
}
