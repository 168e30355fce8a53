//! In-memory session store
//!
//! Backs tests and local runs without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use kernel::id::UserId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::session_token::issue_session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

#[derive(Clone, Default)]
pub struct InMemoryAuthSessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, AuthSession>>>,
}

impl InMemoryAuthSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: AuthSession) {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session);
    }

    /// Store a fresh session and return its signed cookie token
    pub async fn sign_in(&self, config: &AuthConfig, user_id: UserId, role: UserRole) -> String {
        let session = AuthSession::new(user_id, role, Duration::hours(12));
        let token = issue_session_token(&config.session_secret, session.session_id);
        self.insert(session).await;
        token
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl AuthSessionRepository for InMemoryAuthSessionRepository {
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let now_ms = Utc::now().timestamp_millis();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&session_id)
            .filter(|s| s.expires_at_ms > now_ms)
            .cloned())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - sessions.len()) as u64)
    }
}
