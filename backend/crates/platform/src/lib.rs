//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64URL, secure random)
//! - Cookie parsing and forwarding

pub mod cookie;
pub mod crypto;
