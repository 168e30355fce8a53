//! Auth Session Entity
//!
//! A stored session row. Sessions are issued elsewhere; this crate only
//! looks them up and checks expiry.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::entity::session::Session;
use crate::domain::value_object::user_role::UserRole;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4), the signed part of the cookie token
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Current role of the user (read through the users table)
    pub user_role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session valid for `ttl`
    pub fn new(user_id: UserId, user_role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            user_role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Identity handed to request handlers
    pub fn to_session(&self) -> Session {
        Session {
            user_id: self.user_id,
            role: self.user_role,
        }
    }
}
