//! Session Gate
//!
//! The single authorization check in front of every management handler.
//! It reads the session cookie, verifies it and either returns the caller's
//! identity or rejects. It never writes anything.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

pub struct SessionGate<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<S>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: `S` itself need not be Clone behind the Arc.
impl<S> Clone for SessionGate<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SessionGate<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(repo: S, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    /// Any signed-in user
    pub async fn authenticate(&self, headers: &HeaderMap) -> AuthResult<Session> {
        let token = platform::cookie::extract_cookie(headers, &self.config.session_cookie_name)
            .ok_or(AuthError::Unauthenticated)?;

        let use_case = CheckSessionUseCase::new(self.repo.clone(), self.config.clone());
        use_case.execute(&token).await
    }

    /// Signed-in admin only
    pub async fn require_admin(&self, headers: &HeaderMap) -> AuthResult<Session> {
        let session = self.authenticate(headers).await?;
        if !session.is_admin() {
            tracing::warn!(user_id = %session.user_id, role = %session.role, "Admin route denied");
            return Err(AuthError::Forbidden);
        }
        Ok(session)
    }
}
