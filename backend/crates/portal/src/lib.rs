//! Portal Module
//!
//! Server-side half of the management and student pages:
//! - `client` - Typed API client bound to the curriculum endpoint table
//! - `pages` - Page loaders producing view models
//! - `forms` - Course and answer forms, list delete actions
//! - `view` - Badges, timestamps, excerpts and list empty states
//! - `test_result` - Judge verdict display

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod pages;
pub mod test_result;
pub mod view;


pub use client::ApiClient;
pub use config::PortalConfig;
pub use error::{PortalError, PortalResult};
pub use forms::{AnswerForm, CourseForm, Navigator, Notifier, SubmitOutcome};
pub use pages::{Audience, Page};
