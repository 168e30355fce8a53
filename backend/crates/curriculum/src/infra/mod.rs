//! Infrastructure Layer
//!
//! PostgreSQL store for production and an in-memory store for tests and
//! local tooling.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCurriculumRepository;
pub use postgres::PgCurriculumRepository;
