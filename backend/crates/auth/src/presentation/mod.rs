//! Presentation Layer
//!
//! The session gate and the extractors handlers use to invoke it.

pub mod extract;
pub mod gate;

pub use extract::{AdminSession, CurrentSession, HasSessionGate};
pub use gate::SessionGate;
