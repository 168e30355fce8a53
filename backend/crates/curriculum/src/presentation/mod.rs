//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors and the endpoint table for the API.

pub mod dto;
pub mod endpoint;
pub mod extract;
pub mod handlers;
pub mod router;

pub use endpoint::{Endpoint, HttpMethod};
pub use extract::{IdPath, ValidJson};
pub use handlers::CurriculumAppState;
pub use router::{curriculum_router, curriculum_router_generic};
