//! HTTP Handlers
//!
//! Every handler runs the same pipeline: gate, path id, body, use case,
//! response shaping. The session extractor comes first so sessionless
//! requests are rejected before anything else is parsed.

use std::sync::Arc;

use auth::domain::AuthSessionRepository;
use auth::{AdminSession, CurrentSession, HasSessionGate, SessionGate};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::id::markers;

use crate::application::{AnswerUseCase, CourseUseCase, ProblemUseCase};
use crate::domain::repository::CurriculumStore;
use crate::error::CurriculumResult;
use crate::presentation::dto::{
    AnswerDetailResponse, AnswerResponse, AnswerSummaryResponse, CourseDetailResponse,
    CourseResponse, CourseSummaryResponse, CreateAnswerRequest, CreateCourseRequest,
    CreateProblemRequest, ProblemDetailResponse, ProblemResponse, ProblemSummaryResponse,
    UpdateAnswerRequest, UpdateCourseRequest, UpdateProblemRequest,
};
use crate::presentation::extract::{IdPath, ValidJson};

/// Shared state for curriculum handlers
pub struct CurriculumAppState<R, S>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub gate: SessionGate<S>,
}

impl<R, S> Clone for CurriculumAppState<R, S>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<R, S> HasSessionGate for CurriculumAppState<R, S>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    type Sessions = S;

    fn session_gate(&self) -> &SessionGate<S> {
        &self.gate
    }
}

// ============================================================================
// Courses
// ============================================================================

/// GET /api/courses
pub async fn list_courses<R, S>(
    CurrentSession(session): CurrentSession,
    State(state): State<CurriculumAppState<R, S>>,
) -> CurriculumResult<Json<Vec<CourseSummaryResponse>>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let courses = CourseUseCase::new(state.repo.clone()).list(&session).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// POST /api/courses
pub async fn create_course<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    ValidJson(req): ValidJson<CreateCourseRequest>,
) -> CurriculumResult<Json<CourseResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let course = CourseUseCase::new(state.repo.clone())
        .create(req.into(), &session)
        .await?;

    Ok(Json(course.into()))
}

/// GET /api/courses/{course_id}
pub async fn get_course<R, S>(
    CurrentSession(session): CurrentSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(course_id): IdPath<markers::Course>,
) -> CurriculumResult<Json<CourseDetailResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let detail = CourseUseCase::new(state.repo.clone())
        .get(course_id, &session)
        .await?;

    Ok(Json(detail.into()))
}

/// PATCH /api/courses/{course_id}
pub async fn update_course<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(course_id): IdPath<markers::Course>,
    ValidJson(req): ValidJson<UpdateCourseRequest>,
) -> CurriculumResult<Json<CourseResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let course = CourseUseCase::new(state.repo.clone())
        .update(course_id, req.into(), &session)
        .await?;

    Ok(Json(course.into()))
}

/// DELETE /api/courses/{course_id}
pub async fn delete_course<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(course_id): IdPath<markers::Course>,
) -> CurriculumResult<StatusCode>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    CourseUseCase::new(state.repo.clone())
        .delete(course_id, &session)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Problems
// ============================================================================

/// GET /api/problems
pub async fn list_problems<R, S>(
    CurrentSession(session): CurrentSession,
    State(state): State<CurriculumAppState<R, S>>,
) -> CurriculumResult<Json<Vec<ProblemSummaryResponse>>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let problems = ProblemUseCase::new(state.repo.clone()).list(&session).await?;

    Ok(Json(problems.into_iter().map(Into::into).collect()))
}

/// POST /api/problems
pub async fn create_problem<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    ValidJson(req): ValidJson<CreateProblemRequest>,
) -> CurriculumResult<Json<ProblemDetailResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let created = ProblemUseCase::new(state.repo.clone())
        .create(req.into(), &session)
        .await?;

    Ok(Json(ProblemDetailResponse {
        problem: created.problem.into(),
        answers: created.answers.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/problems/{problem_id}
pub async fn get_problem<R, S>(
    CurrentSession(session): CurrentSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(problem_id): IdPath<markers::Problem>,
) -> CurriculumResult<Json<ProblemSummaryResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let problem = ProblemUseCase::new(state.repo.clone())
        .get(problem_id, &session)
        .await?;

    Ok(Json(problem.into()))
}

/// PATCH /api/problems/{problem_id}
pub async fn update_problem<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(problem_id): IdPath<markers::Problem>,
    ValidJson(req): ValidJson<UpdateProblemRequest>,
) -> CurriculumResult<Json<ProblemResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let problem = ProblemUseCase::new(state.repo.clone())
        .update(problem_id, req.into(), &session)
        .await?;

    Ok(Json(problem.into()))
}

/// DELETE /api/problems/{problem_id}
pub async fn delete_problem<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(problem_id): IdPath<markers::Problem>,
) -> CurriculumResult<StatusCode>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    ProblemUseCase::new(state.repo.clone())
        .delete(problem_id, &session)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Answers
// ============================================================================

/// GET /api/problems/{problem_id}/answers
pub async fn list_answers<R, S>(
    CurrentSession(session): CurrentSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(problem_id): IdPath<markers::Problem>,
) -> CurriculumResult<Json<Vec<AnswerSummaryResponse>>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let answers = AnswerUseCase::new(state.repo.clone())
        .list(problem_id, &session)
        .await?;

    Ok(Json(answers.into_iter().map(Into::into).collect()))
}

/// POST /api/problems/{problem_id}/answers
pub async fn create_answer<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(problem_id): IdPath<markers::Problem>,
    ValidJson(req): ValidJson<CreateAnswerRequest>,
) -> CurriculumResult<Json<AnswerResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let answer = AnswerUseCase::new(state.repo.clone())
        .create(problem_id, req.into(), &session)
        .await?;

    Ok(Json(answer.into()))
}

/// GET /api/problems/answers/{answer_id}
pub async fn get_answer<R, S>(
    CurrentSession(session): CurrentSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(answer_id): IdPath<markers::Answer>,
) -> CurriculumResult<Json<AnswerDetailResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let answer = AnswerUseCase::new(state.repo.clone())
        .get(answer_id, &session)
        .await?;

    Ok(Json(answer.into()))
}

/// PATCH /api/problems/answers/{answer_id}
pub async fn update_answer<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(answer_id): IdPath<markers::Answer>,
    ValidJson(req): ValidJson<UpdateAnswerRequest>,
) -> CurriculumResult<Json<AnswerResponse>>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let answer = AnswerUseCase::new(state.repo.clone())
        .update(answer_id, req.into(), &session)
        .await?;

    Ok(Json(answer.into()))
}

/// DELETE /api/problems/answers/{answer_id}
pub async fn delete_answer<R, S>(
    AdminSession(session): AdminSession,
    State(state): State<CurriculumAppState<R, S>>,
    IdPath(answer_id): IdPath<markers::Answer>,
) -> CurriculumResult<StatusCode>
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    AnswerUseCase::new(state.repo.clone())
        .delete(answer_id, &session)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
