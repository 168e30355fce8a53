//! Auth (Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, role, read scope, repository trait
//! - `application/` - Session token verification use case
//! - `infra/` - PostgreSQL and in-memory session stores
//! - `presentation/` - The session gate and request extractors
//!
//! ## Security Model
//! - Sessions are issued by the sign-in service and only consumed here
//! - Cookie token is `<uuid>.<HMAC-SHA256 signature>`, verified in constant time
//! - The role is read from the users table on every request
//! - Missing or invalid session and non-admin on admin route -> 403

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::{ReadScope, Session, UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthSessionRepository, PgAuthSessionRepository};
pub use presentation::{AdminSession, CurrentSession, HasSessionGate, SessionGate};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
