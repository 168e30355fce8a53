//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::AuthSession, session::Session};
pub use repository::AuthSessionRepository;
pub use value_object::{read_scope::ReadScope, user_role::UserRole};
