//! Course Use Case

use std::sync::Arc;

use auth::{ReadScope, Session};
use kernel::id::CourseId;

use crate::domain::entities::{Course, CourseDetail, CoursePatch, CourseSummary, NewCourse};
use crate::domain::repository::{CourseRepository, ProblemRepository};
use crate::domain::value_objects::{Action, EntityKind, Operation};
use crate::error::{CurriculumError, CurriculumResult, OperationContext};

const fn op(action: Action) -> Operation {
    Operation::new(EntityKind::Course, action)
}

pub struct CourseUseCase<R>
where
    R: CourseRepository + ProblemRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> CourseUseCase<R>
where
    R: CourseRepository + ProblemRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, session: &Session) -> CurriculumResult<Vec<CourseSummary>> {
        self.repo
            .list_courses(ReadScope::for_session(session))
            .await
            .during(op(Action::List))
    }

    /// Course plus the problems the session may read
    pub async fn get(&self, id: CourseId, session: &Session) -> CurriculumResult<CourseDetail> {
        let scope = ReadScope::for_session(session);

        let course = self
            .repo
            .find_course(id, scope)
            .await
            .during(op(Action::Get))?
            .ok_or(CurriculumError::CourseNotFound)?;

        let problems = self
            .repo
            .list_problems_in_course(id, scope)
            .await
            .during(op(Action::Get))?;

        Ok(CourseDetail { course, problems })
    }

    pub async fn create(&self, input: NewCourse, session: &Session) -> CurriculumResult<Course> {
        let course = Course::new(input, session.user_id);

        self.repo
            .insert_course(&course)
            .await
            .during(op(Action::Create))?;

        tracing::info!(course_id = %course.id, user_id = %session.user_id, "Created course");

        Ok(course)
    }

    pub async fn update(
        &self,
        id: CourseId,
        patch: CoursePatch,
        session: &Session,
    ) -> CurriculumResult<Course> {
        let course = self
            .repo
            .update_course(id, &patch, session.user_id)
            .await
            .during(op(Action::Update))?
            .ok_or(CurriculumError::CourseNotFound)?;

        tracing::info!(course_id = %id, user_id = %session.user_id, "Updated course");

        Ok(course)
    }

    pub async fn delete(&self, id: CourseId, session: &Session) -> CurriculumResult<()> {
        self.repo
            .delete_course(id)
            .await
            .during(op(Action::Delete))?
            .ok_or(CurriculumError::CourseNotFound)?;

        tracing::info!(course_id = %id, user_id = %session.user_id, "Deleted course");

        Ok(())
    }
}
