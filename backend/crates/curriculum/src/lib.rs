//! Curriculum Management Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Course, problem and answer entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs and the endpoint table
//!
//! ## Access Model
//! - Every route sits behind the auth crate's session gate
//! - Reads need a session; students only ever see public rows
//! - Mutations need an admin session and stamp the admin as updater
//! - A hidden or missing record is the same 404

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use domain::CurriculumStore;
pub use error::{CurriculumError, CurriculumResult};
pub use infra::{InMemoryCurriculumRepository, PgCurriculumRepository};
pub use presentation::router::{curriculum_router, curriculum_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod endpoints {
    pub use crate::presentation::endpoint::*;
}
