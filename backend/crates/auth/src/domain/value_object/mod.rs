//! Value Object Module

pub mod read_scope;
pub mod user_role;
