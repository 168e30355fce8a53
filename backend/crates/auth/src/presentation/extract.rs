//! Session extractors
//!
//! Put `AdminSession` / `CurrentSession` first in a handler's argument list
//! so the gate rejects before any path or body extraction runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::entity::session::Session;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;
use crate::presentation::gate::SessionGate;

/// Router state that carries a [`SessionGate`]
pub trait HasSessionGate {
    type Sessions: AuthSessionRepository + Send + Sync + 'static;

    fn session_gate(&self) -> &SessionGate<Self::Sessions>;
}

impl<S> HasSessionGate for SessionGate<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    type Sessions = S;

    fn session_gate(&self) -> &SessionGate<S> {
        self
    }
}

/// Any authenticated session (403 otherwise)
#[derive(Debug, Clone, Copy)]
pub struct CurrentSession(pub Session);

/// Authenticated admin session (403 otherwise)
#[derive(Debug, Clone, Copy)]
pub struct AdminSession(pub Session);

impl<St> FromRequestParts<St> for CurrentSession
where
    St: HasSessionGate + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        state
            .session_gate()
            .authenticate(&parts.headers)
            .await
            .map(CurrentSession)
    }
}

impl<St> FromRequestParts<St> for AdminSession
where
    St: HasSessionGate + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        state
            .session_gate()
            .require_admin(&parts.headers)
            .await
            .map(AdminSession)
    }
}
