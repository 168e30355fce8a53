//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Reads take a [`ReadScope`] so private rows never leave the store for a
//! student. Updates and deletes return `None` when the id does not exist.

use auth::ReadScope;
use kernel::id::{AnswerId, CourseId, ProblemId, UserId};

use crate::domain::entities::{
    Answer, AnswerPatch, AnswerWithProblem, Course, CoursePatch, CourseSummary, Problem,
    ProblemPatch, ProblemWithCourse,
};
use crate::error::CurriculumResult;

/// Course repository trait
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    /// Newest first
    async fn list_courses(&self, scope: ReadScope) -> CurriculumResult<Vec<CourseSummary>>;

    async fn find_course(&self, id: CourseId, scope: ReadScope)
    -> CurriculumResult<Option<Course>>;

    async fn insert_course(&self, course: &Course) -> CurriculumResult<()>;

    async fn update_course(
        &self,
        id: CourseId,
        patch: &CoursePatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Course>>;

    /// Problems of the course are detached, not deleted
    async fn delete_course(&self, id: CourseId) -> CurriculumResult<Option<Course>>;
}

/// Problem repository trait
#[trait_variant::make(ProblemRepository: Send)]
pub trait LocalProblemRepository {
    async fn list_problems(&self, scope: ReadScope) -> CurriculumResult<Vec<ProblemWithCourse>>;

    async fn list_problems_in_course(
        &self,
        course_id: CourseId,
        scope: ReadScope,
    ) -> CurriculumResult<Vec<Problem>>;

    async fn find_problem(
        &self,
        id: ProblemId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<ProblemWithCourse>>;

    /// Insert the problem and its inline answers atomically.
    /// Fails with `CourseNotFound` when `course_id` is dangling.
    async fn insert_problem(&self, problem: &Problem, answers: &[Answer]) -> CurriculumResult<()>;

    async fn update_problem(
        &self,
        id: ProblemId,
        patch: &ProblemPatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Problem>>;

    /// Answers of the problem are deleted with it
    async fn delete_problem(&self, id: ProblemId) -> CurriculumResult<Option<Problem>>;
}

/// Answer repository trait
#[trait_variant::make(AnswerRepository: Send)]
pub trait LocalAnswerRepository {
    async fn list_answers(
        &self,
        problem_id: ProblemId,
        scope: ReadScope,
    ) -> CurriculumResult<Vec<Answer>>;

    async fn find_answer(
        &self,
        id: AnswerId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<AnswerWithProblem>>;

    /// Fails with `ProblemNotFound` when the parent problem is gone
    async fn insert_answer(&self, answer: &Answer) -> CurriculumResult<()>;

    async fn update_answer(
        &self,
        id: AnswerId,
        patch: &AnswerPatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Answer>>;

    async fn delete_answer(&self, id: AnswerId) -> CurriculumResult<Option<Answer>>;
}

/// Everything the HTTP layer needs from one store
pub trait CurriculumStore:
    CourseRepository + ProblemRepository + AnswerRepository + Clone + Send + Sync + 'static
{
}

impl<T> CurriculumStore for T where
    T: CourseRepository + ProblemRepository + AnswerRepository + Clone + Send + Sync + 'static
{
}
