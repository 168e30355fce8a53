//! In-memory curriculum store
//!
//! Mirrors the Postgres foreign keys: deleting a course detaches its
//! problems, deleting a problem removes its answers, and inserts with a
//! dangling parent fail with the parent's not-found error.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use auth::ReadScope;
use chrono::Utc;
use kernel::id::{AnswerId, CourseId, ProblemId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{
    Answer, AnswerPatch, AnswerWithProblem, Course, CoursePatch, CourseRef, CourseSummary,
    Problem, ProblemPatch, ProblemRef, ProblemWithCourse,
};
use crate::domain::repository::{AnswerRepository, CourseRepository, ProblemRepository};
use crate::error::{CurriculumError, CurriculumResult};

#[derive(Default)]
struct MemoryState {
    courses: HashMap<CourseId, Course>,
    problems: HashMap<ProblemId, Problem>,
    answers: HashMap<AnswerId, Answer>,
}

impl MemoryState {
    fn problem_with_course(&self, problem: &Problem, scope: ReadScope) -> ProblemWithCourse {
        let course = problem
            .course_id
            .and_then(|id| self.courses.get(&id))
            .map(|c| CourseRef {
                id: c.id,
                title: c.title.clone(),
            });
        let answer_count = self
            .answers
            .values()
            .filter(|a| a.problem_id == problem.id && scope.allows(a.is_public))
            .count() as i64;

        ProblemWithCourse {
            problem: problem.clone(),
            course,
            answer_count,
        }
    }
}

/// Newest first, id as tie-break
fn sort_newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, String)) {
    rows.sort_by_key(|row| {
        let (updated_at, id) = key(row);
        (Reverse(updated_at), id)
    });
}

#[derive(Clone, Default)]
pub struct InMemoryCurriculumRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryCurriculumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts (courses, problems, answers)
    pub async fn counts(&self) -> (usize, usize, usize) {
        let state = self.state.read().await;
        (
            state.courses.len(),
            state.problems.len(),
            state.answers.len(),
        )
    }
}

impl CourseRepository for InMemoryCurriculumRepository {
    async fn list_courses(&self, scope: ReadScope) -> CurriculumResult<Vec<CourseSummary>> {
        let state = self.state.read().await;
        let mut rows: Vec<CourseSummary> = state
            .courses
            .values()
            .filter(|c| scope.allows(c.is_public))
            .map(|c| CourseSummary {
                course: c.clone(),
                problem_count: state
                    .problems
                    .values()
                    .filter(|p| p.course_id == Some(c.id) && scope.allows(p.is_public))
                    .count() as i64,
            })
            .collect();
        sort_newest_first(&mut rows, |r| {
            (r.course.updated_at, r.course.id.to_string())
        });
        Ok(rows)
    }

    async fn find_course(
        &self,
        id: CourseId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<Course>> {
        let state = self.state.read().await;
        Ok(state
            .courses
            .get(&id)
            .filter(|c| scope.allows(c.is_public))
            .cloned())
    }

    async fn insert_course(&self, course: &Course) -> CurriculumResult<()> {
        let mut state = self.state.write().await;
        state.courses.insert(course.id, course.clone());
        Ok(())
    }

    async fn update_course(
        &self,
        id: CourseId,
        patch: &CoursePatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Course>> {
        let mut state = self.state.write().await;
        Ok(state.courses.get_mut(&id).map(|course| {
            course.apply(patch, actor);
            course.clone()
        }))
    }

    async fn delete_course(&self, id: CourseId) -> CurriculumResult<Option<Course>> {
        let mut state = self.state.write().await;
        let removed = state.courses.remove(&id);
        if removed.is_some() {
            for problem in state.problems.values_mut() {
                if problem.course_id == Some(id) {
                    problem.course_id = None;
                }
            }
        }
        Ok(removed)
    }
}

impl ProblemRepository for InMemoryCurriculumRepository {
    async fn list_problems(&self, scope: ReadScope) -> CurriculumResult<Vec<ProblemWithCourse>> {
        let state = self.state.read().await;
        let mut rows: Vec<ProblemWithCourse> = state
            .problems
            .values()
            .filter(|p| scope.allows(p.is_public))
            .map(|p| state.problem_with_course(p, scope))
            .collect();
        sort_newest_first(&mut rows, |r| {
            (r.problem.updated_at, r.problem.id.to_string())
        });
        Ok(rows)
    }

    async fn list_problems_in_course(
        &self,
        course_id: CourseId,
        scope: ReadScope,
    ) -> CurriculumResult<Vec<Problem>> {
        let state = self.state.read().await;
        let mut rows: Vec<Problem> = state
            .problems
            .values()
            .filter(|p| p.course_id == Some(course_id) && scope.allows(p.is_public))
            .cloned()
            .collect();
        sort_newest_first(&mut rows, |p| (p.updated_at, p.id.to_string()));
        Ok(rows)
    }

    async fn find_problem(
        &self,
        id: ProblemId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<ProblemWithCourse>> {
        let state = self.state.read().await;
        Ok(state
            .problems
            .get(&id)
            .filter(|p| scope.allows(p.is_public))
            .map(|p| state.problem_with_course(p, scope)))
    }

    async fn insert_problem(&self, problem: &Problem, answers: &[Answer]) -> CurriculumResult<()> {
        let mut state = self.state.write().await;
        if let Some(course_id) = problem.course_id {
            if !state.courses.contains_key(&course_id) {
                return Err(CurriculumError::CourseNotFound);
            }
        }
        state.problems.insert(problem.id, problem.clone());
        for answer in answers {
            state.answers.insert(answer.id, answer.clone());
        }
        Ok(())
    }

    async fn update_problem(
        &self,
        id: ProblemId,
        patch: &ProblemPatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Problem>> {
        let mut state = self.state.write().await;
        if let Some(course_id) = patch.course_id {
            if state.problems.contains_key(&id) && !state.courses.contains_key(&course_id) {
                return Err(CurriculumError::CourseNotFound);
            }
        }
        Ok(state.problems.get_mut(&id).map(|problem| {
            problem.apply(patch, actor);
            problem.clone()
        }))
    }

    async fn delete_problem(&self, id: ProblemId) -> CurriculumResult<Option<Problem>> {
        let mut state = self.state.write().await;
        let removed = state.problems.remove(&id);
        if removed.is_some() {
            state.answers.retain(|_, a| a.problem_id != id);
        }
        Ok(removed)
    }
}

impl AnswerRepository for InMemoryCurriculumRepository {
    async fn list_answers(
        &self,
        problem_id: ProblemId,
        scope: ReadScope,
    ) -> CurriculumResult<Vec<Answer>> {
        let state = self.state.read().await;
        let mut rows: Vec<Answer> = state
            .answers
            .values()
            .filter(|a| a.problem_id == problem_id && scope.allows(a.is_public))
            .cloned()
            .collect();
        sort_newest_first(&mut rows, |a| (a.updated_at, a.id.to_string()));
        Ok(rows)
    }

    async fn find_answer(
        &self,
        id: AnswerId,
        scope: ReadScope,
    ) -> CurriculumResult<Option<AnswerWithProblem>> {
        let state = self.state.read().await;
        let Some(answer) = state.answers.get(&id) else {
            return Ok(None);
        };
        let Some(problem) = state.problems.get(&answer.problem_id) else {
            return Ok(None);
        };
        if !scope.allows(answer.is_public) || !scope.allows(problem.is_public) {
            return Ok(None);
        }
        Ok(Some(AnswerWithProblem {
            answer: answer.clone(),
            problem: ProblemRef {
                id: problem.id,
                title: problem.title.clone(),
            },
        }))
    }

    async fn insert_answer(&self, answer: &Answer) -> CurriculumResult<()> {
        let mut state = self.state.write().await;
        if !state.problems.contains_key(&answer.problem_id) {
            return Err(CurriculumError::ProblemNotFound);
        }
        state.answers.insert(answer.id, answer.clone());
        Ok(())
    }

    async fn update_answer(
        &self,
        id: AnswerId,
        patch: &AnswerPatch,
        actor: UserId,
    ) -> CurriculumResult<Option<Answer>> {
        let mut state = self.state.write().await;
        Ok(state.answers.get_mut(&id).map(|answer| {
            answer.apply(patch, actor);
            answer.clone()
        }))
    }

    async fn delete_answer(&self, id: AnswerId) -> CurriculumResult<Option<Answer>> {
        let mut state = self.state.write().await;
        Ok(state.answers.remove(&id))
    }
}
