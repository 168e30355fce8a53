//! Application Layer - Use Cases
//!
//! One use case per entity. Each method runs a single request's worth of
//! work against the repository and tags unexpected failures with the
//! operation they interrupted.

pub mod answer;
pub mod course;
pub mod problem;

pub use answer::AnswerUseCase;
pub use course::CourseUseCase;
pub use problem::ProblemUseCase;
