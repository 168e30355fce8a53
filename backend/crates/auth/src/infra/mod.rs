//! Infrastructure Layer
//!
//! Database implementations and the in-memory store.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAuthSessionRepository;
pub use postgres::PgAuthSessionRepository;
