//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{
    Answer, AnswerPatch, AnswerWithProblem, Course, CourseDetail, CoursePatch, CourseRef,
    CourseSummary, NewAnswer, NewCourse, NewProblem, Problem, ProblemPatch, ProblemRef,
    ProblemWithCourse,
};
pub use repository::{AnswerRepository, CourseRepository, CurriculumStore, ProblemRepository};
pub use value_objects::{Action, EntityKind, Operation};
