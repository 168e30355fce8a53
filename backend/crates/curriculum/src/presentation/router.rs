//! Curriculum Router
//!
//! Handlers are registered at the endpoint table's templates, one method
//! filter per entry.

use std::sync::Arc;

use auth::domain::AuthSessionRepository;
use auth::{PgAuthSessionRepository, SessionGate};
use axum::Router;
use axum::handler::Handler;
use axum::routing::on;

use crate::domain::repository::CurriculumStore;
use crate::infra::postgres::PgCurriculumRepository;
use crate::presentation::endpoint::{self as ep, Endpoint};
use crate::presentation::handlers::{self, CurriculumAppState};

fn register<St, H, T, Req, Res>(
    router: Router<St>,
    endpoint: Endpoint<Req, Res>,
    handler: H,
) -> Router<St>
where
    St: Clone + Send + Sync + 'static,
    H: Handler<T, St>,
    T: 'static,
{
    router.route(endpoint.path, on(endpoint.method.filter(), handler))
}

/// Create the curriculum router with the PostgreSQL stores
pub fn curriculum_router(
    repo: PgCurriculumRepository,
    gate: SessionGate<PgAuthSessionRepository>,
) -> Router {
    curriculum_router_generic(repo, gate)
}

/// Create a generic curriculum router for any store implementation
pub fn curriculum_router_generic<R, S>(repo: R, gate: SessionGate<S>) -> Router
where
    R: CurriculumStore,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let state = CurriculumAppState {
        repo: Arc::new(repo),
        gate,
    };

    let router: Router<CurriculumAppState<R, S>> = Router::new();

    // Courses
    let router = register(router, ep::LIST_COURSES, handlers::list_courses::<R, S>);
    let router = register(router, ep::CREATE_COURSE, handlers::create_course::<R, S>);
    let router = register(router, ep::GET_COURSE, handlers::get_course::<R, S>);
    let router = register(router, ep::UPDATE_COURSE, handlers::update_course::<R, S>);
    let router = register(router, ep::DELETE_COURSE, handlers::delete_course::<R, S>);

    // Problems
    let router = register(router, ep::LIST_PROBLEMS, handlers::list_problems::<R, S>);
    let router = register(router, ep::CREATE_PROBLEM, handlers::create_problem::<R, S>);
    let router = register(router, ep::GET_PROBLEM, handlers::get_problem::<R, S>);
    let router = register(router, ep::UPDATE_PROBLEM, handlers::update_problem::<R, S>);
    let router = register(router, ep::DELETE_PROBLEM, handlers::delete_problem::<R, S>);

    // Answers
    let router = register(router, ep::LIST_ANSWERS, handlers::list_answers::<R, S>);
    let router = register(router, ep::CREATE_ANSWER, handlers::create_answer::<R, S>);
    let router = register(router, ep::GET_ANSWER, handlers::get_answer::<R, S>);
    let router = register(router, ep::UPDATE_ANSWER, handlers::update_answer::<R, S>);
    let router = register(router, ep::DELETE_ANSWER, handlers::delete_answer::<R, S>);

    router.with_state(state)
}
