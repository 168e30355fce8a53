//! Answer Use Case

use std::sync::Arc;

use auth::{ReadScope, Session};
use kernel::id::{AnswerId, ProblemId};

use crate::domain::entities::{Answer, AnswerPatch, AnswerWithProblem, NewAnswer};
use crate::domain::repository::{AnswerRepository, ProblemRepository};
use crate::domain::value_objects::{Action, EntityKind, Operation};
use crate::error::{CurriculumError, CurriculumResult, OperationContext};

const fn op(action: Action) -> Operation {
    Operation::new(EntityKind::Answer, action)
}

pub struct AnswerUseCase<R>
where
    R: AnswerRepository + ProblemRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> AnswerUseCase<R>
where
    R: AnswerRepository + ProblemRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Answers of a problem; 404 when the problem itself is not readable
    pub async fn list(
        &self,
        problem_id: ProblemId,
        session: &Session,
    ) -> CurriculumResult<Vec<Answer>> {
        let scope = ReadScope::for_session(session);

        self.repo
            .find_problem(problem_id, scope)
            .await
            .during(op(Action::List))?
            .ok_or(CurriculumError::ProblemNotFound)?;

        self.repo
            .list_answers(problem_id, scope)
            .await
            .during(op(Action::List))
    }

    pub async fn get(&self, id: AnswerId, session: &Session) -> CurriculumResult<AnswerWithProblem> {
        self.repo
            .find_answer(id, ReadScope::for_session(session))
            .await
            .during(op(Action::Get))?
            .ok_or(CurriculumError::AnswerNotFound)
    }

    /// A dangling `problem_id` surfaces as `ProblemNotFound` from the store
    pub async fn create(
        &self,
        problem_id: ProblemId,
        input: NewAnswer,
        session: &Session,
    ) -> CurriculumResult<Answer> {
        let answer = Answer::new(problem_id, input, session.user_id);

        self.repo
            .insert_answer(&answer)
            .await
            .during(op(Action::Create))?;

        tracing::info!(
            answer_id = %answer.id,
            problem_id = %problem_id,
            user_id = %session.user_id,
            "Created answer"
        );

        Ok(answer)
    }

    pub async fn update(
        &self,
        id: AnswerId,
        patch: AnswerPatch,
        session: &Session,
    ) -> CurriculumResult<Answer> {
        let answer = self
            .repo
            .update_answer(id, &patch, session.user_id)
            .await
            .during(op(Action::Update))?
            .ok_or(CurriculumError::AnswerNotFound)?;

        tracing::info!(answer_id = %id, user_id = %session.user_id, "Updated answer");

        Ok(answer)
    }

    pub async fn delete(&self, id: AnswerId, session: &Session) -> CurriculumResult<()> {
        self.repo
            .delete_answer(id)
            .await
            .during(op(Action::Delete))?
            .ok_or(CurriculumError::AnswerNotFound)?;

        tracing::info!(answer_id = %id, user_id = %session.user_id, "Deleted answer");

        Ok(())
    }
}
