//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed session repository
#[derive(Clone)]
pub struct PgAuthSessionRepository {
    pool: PgPool,
}

impl PgAuthSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AuthSessionRepository for PgAuthSessionRepository {
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let now_ms = Utc::now().timestamp_millis();

        // Role comes from users so a demotion takes effect on the next request.
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                s.session_id,
                s.user_id,
                u.user_role,
                s.expires_at_ms,
                s.created_at
            FROM auth_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.session_id = $1 AND s.expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthSessionRow::into_session).transpose()
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: String,
    user_role: i16,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let user_id = UserId::parse_str(&self.user_id)
            .map_err(|e| AuthError::Internal(format!("Invalid user_id: {}", e)))?;
        let user_role = UserRole::from_id(self.user_role).ok_or_else(|| {
            AuthError::Internal(format!("Invalid UserRole id: {}", self.user_role))
        })?;

        Ok(AuthSession {
            session_id: self.session_id,
            user_id,
            user_role,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        })
    }
}
