//! Problem Use Case

use std::sync::Arc;

use auth::{ReadScope, Session};
use kernel::id::ProblemId;

use crate::domain::entities::{Answer, NewProblem, Problem, ProblemPatch, ProblemWithCourse};
use crate::domain::repository::ProblemRepository;
use crate::domain::value_objects::{Action, EntityKind, Operation};
use crate::error::{CurriculumError, CurriculumResult, OperationContext};

const fn op(action: Action) -> Operation {
    Operation::new(EntityKind::Problem, action)
}

/// Output for problem creation
#[derive(Debug, Clone)]
pub struct CreatedProblem {
    pub problem: Problem,
    pub answers: Vec<Answer>,
}

pub struct ProblemUseCase<R>
where
    R: ProblemRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ProblemUseCase<R>
where
    R: ProblemRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, session: &Session) -> CurriculumResult<Vec<ProblemWithCourse>> {
        self.repo
            .list_problems(ReadScope::for_session(session))
            .await
            .during(op(Action::List))
    }

    pub async fn get(
        &self,
        id: ProblemId,
        session: &Session,
    ) -> CurriculumResult<ProblemWithCourse> {
        self.repo
            .find_problem(id, ReadScope::for_session(session))
            .await
            .during(op(Action::Get))?
            .ok_or(CurriculumError::ProblemNotFound)
    }

    /// Create a problem together with its inline model answers
    pub async fn create(
        &self,
        input: NewProblem,
        session: &Session,
    ) -> CurriculumResult<CreatedProblem> {
        let (problem, answers) = Problem::new(input, session.user_id);

        self.repo
            .insert_problem(&problem, &answers)
            .await
            .during(op(Action::Create))?;

        tracing::info!(
            problem_id = %problem.id,
            answers = answers.len(),
            user_id = %session.user_id,
            "Created problem"
        );

        Ok(CreatedProblem { problem, answers })
    }

    pub async fn update(
        &self,
        id: ProblemId,
        patch: ProblemPatch,
        session: &Session,
    ) -> CurriculumResult<Problem> {
        let problem = self
            .repo
            .update_problem(id, &patch, session.user_id)
            .await
            .during(op(Action::Update))?
            .ok_or(CurriculumError::ProblemNotFound)?;

        tracing::info!(problem_id = %id, user_id = %session.user_id, "Updated problem");

        Ok(problem)
    }

    pub async fn delete(&self, id: ProblemId, session: &Session) -> CurriculumResult<()> {
        self.repo
            .delete_problem(id)
            .await
            .during(op(Action::Delete))?
            .ok_or(CurriculumError::ProblemNotFound)?;

        tracing::info!(problem_id = %id, user_id = %session.user_id, "Deleted problem");

        Ok(())
    }
}
