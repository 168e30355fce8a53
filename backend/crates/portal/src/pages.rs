//! Page loaders
//!
//! Each loader fetches what one server-rendered page needs and shapes it
//! into view models. A missing record yields [`Page::NotFound`]; any other
//! failure is returned as an error for the error page. Path segments that
//! do not parse as ids are not found without a request.

use curriculum::endpoints as ep;
use curriculum::models::{AnswerDetailResponse, ProblemSummaryResponse};
use kernel::id::{AnswerId, CourseId, ProblemId};

use crate::client::ApiClient;
use crate::error::PortalResult;
use crate::forms::{AnswerForm, CourseForm};
use crate::view::{
    AnswerRow, Badge, CourseRow, ListView, MANAGE_EXCERPT_CHARS, MSG_NO_ANSWERS, MSG_NO_COURSES,
    MSG_NO_PROBLEMS_IN_COURSE, ProblemRow, STUDENT_EXCERPT_CHARS, visibility_badge,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Page<T> {
    Ready(T),
    NotFound,
}

impl<T> Page<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Page::Ready(value) => Some(value),
            Page::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Page::NotFound)
    }
}

/// 404 becomes `Page::NotFound`, everything else propagates
fn not_found_or<T>(result: PortalResult<T>) -> PortalResult<Page<T>> {
    match result {
        Ok(value) => Ok(Page::Ready(value)),
        Err(e) if e.is_not_found() => Ok(Page::NotFound),
        Err(e) => Err(e),
    }
}

/// Route parameter as a typed id, or not-found
macro_rules! id_or_not_found {
    ($raw:expr, $ty:ty) => {
        match <$ty>::parse_str($raw) {
            Ok(id) => id,
            Err(_) => return Ok(Page::NotFound),
        }
    };
}

/// Who is looking at an answers page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Manage,
    Student,
}

impl Audience {
    fn excerpt_chars(self) -> usize {
        match self {
            Audience::Manage => MANAGE_EXCERPT_CHARS,
            Audience::Student => STUDENT_EXCERPT_CHARS,
        }
    }
}

// ============================================================================
// Courses
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CoursesPage {
    pub courses: ListView<CourseRow>,
}

/// /manage/courses
///
/// A 403 renders as not-found so the page does not reveal itself.
pub async fn manage_courses(client: &ApiClient) -> PortalResult<Page<CoursesPage>> {
    match client.call(ep::LIST_COURSES, &[], None).await {
        Ok(courses) => {
            let rows = courses.iter().map(CourseRow::from).collect();
            Ok(Page::Ready(CoursesPage {
                courses: ListView::new(rows, MSG_NO_COURSES),
            }))
        }
        Err(e) if e.is_forbidden() || e.is_not_found() => Ok(Page::NotFound),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetailPage {
    pub course_id: String,
    pub title: String,
    pub badge: Badge,
    /// `問題一覧（N件）`
    pub heading: String,
    pub problems: ListView<ProblemRow>,
    pub edit_href: String,
    pub new_problem_href: String,
}

/// /manage/courses/{course_id}
pub async fn course_detail(
    client: &ApiClient,
    course_id: &str,
) -> PortalResult<Page<CourseDetailPage>> {
    let course_id = id_or_not_found!(course_id, CourseId);
    let detail = match not_found_or(
        client
            .call(ep::GET_COURSE, &[course_id.as_str()], None)
            .await,
    )? {
        Page::Ready(detail) => detail,
        Page::NotFound => return Ok(Page::NotFound),
    };

    let rows: Vec<ProblemRow> = detail.problems.iter().map(ProblemRow::from).collect();

    Ok(Page::Ready(CourseDetailPage {
        course_id: detail.course.id.to_string(),
        title: detail.course.title.clone(),
        badge: visibility_badge(detail.course.is_public),
        heading: format!("問題一覧（{}件）", rows.len()),
        problems: ListView::new(rows, MSG_NO_PROBLEMS_IN_COURSE),
        edit_href: format!("/manage/courses/{course_id}/edit"),
        new_problem_href: format!("/manage/courses/{course_id}/new"),
    }))
}

/// /manage/courses/{course_id}/edit
pub async fn course_edit(client: &ApiClient, course_id: &str) -> PortalResult<Page<CourseForm>> {
    let course_id = id_or_not_found!(course_id, CourseId);
    let page = not_found_or(
        client
            .call(ep::GET_COURSE, &[course_id.as_str()], None)
            .await,
    )?;
    Ok(match page {
        Page::Ready(detail) => Page::Ready(CourseForm::edit(&detail.course)),
        Page::NotFound => Page::NotFound,
    })
}

// ============================================================================
// Problems and answers
// ============================================================================

/// /manage/problems/{problem_id}
pub async fn manage_problem(
    client: &ApiClient,
    problem_id: &str,
) -> PortalResult<Page<ProblemSummaryResponse>> {
    let problem_id = id_or_not_found!(problem_id, ProblemId);
    not_found_or(
        client
            .call(ep::GET_PROBLEM, &[problem_id.as_str()], None)
            .await,
    )
}

#[derive(Debug, Clone)]
pub struct NewAnswerPage {
    pub problem_title: String,
    pub form: AnswerForm,
}

/// /manage/problems/{problem_id}/answers/new
pub async fn new_answer(client: &ApiClient, problem_id: &str) -> PortalResult<Page<NewAnswerPage>> {
    let problem_id = id_or_not_found!(problem_id, ProblemId);
    let page = not_found_or(
        client
            .call(ep::GET_PROBLEM, &[problem_id.as_str()], None)
            .await,
    )?;
    Ok(match page {
        Page::Ready(problem) => Page::Ready(NewAnswerPage {
            form: AnswerForm::new(problem.problem.id),
            problem_title: problem.problem.title,
        }),
        Page::NotFound => Page::NotFound,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswersPage {
    pub problem_id: String,
    pub problem_title: String,
    pub answers: ListView<AnswerRow>,
}

/// /manage/problems/{problem_id}/answers and the student counterpart
///
/// The problem and its answers are fetched concurrently.
pub async fn problem_answers(
    client: &ApiClient,
    problem_id: &str,
    audience: Audience,
) -> PortalResult<Page<AnswersPage>> {
    let problem_id = id_or_not_found!(problem_id, ProblemId);
    let path = [problem_id.as_str()];
    let (problem, answers) = tokio::join!(
        client.call(ep::GET_PROBLEM, &path, None),
        client.call(ep::LIST_ANSWERS, &path, None),
    );

    let problem = match not_found_or(problem)? {
        Page::Ready(problem) => problem,
        Page::NotFound => return Ok(Page::NotFound),
    };
    let answers = answers?;

    let rows = answers
        .iter()
        .map(|a| AnswerRow::new(a, audience.excerpt_chars()))
        .collect();

    Ok(Page::Ready(AnswersPage {
        problem_id: problem.problem.id.to_string(),
        problem_title: problem.problem.title,
        answers: ListView::new(rows, MSG_NO_ANSWERS),
    }))
}

/// /students/problems/{problem_id}/answers/{answer_id}
///
/// An answer reached through another problem's URL is not found.
pub async fn answer_detail(
    client: &ApiClient,
    problem_id: &str,
    answer_id: &str,
) -> PortalResult<Page<AnswerDetailResponse>> {
    let problem_id = id_or_not_found!(problem_id, ProblemId);
    let answer_id = id_or_not_found!(answer_id, AnswerId);
    let page = not_found_or(
        client
            .call(ep::GET_ANSWER, &[answer_id.as_str()], None)
            .await,
    )?;
    Ok(match page {
        Page::Ready(answer) if answer.answer.problem_id == problem_id => {
            Page::Ready(answer)
        }
        _ => Page::NotFound,
    })
}

/// /manage/problems/{problem_id}/answers/{answer_id}/edit
pub async fn answer_edit(
    client: &ApiClient,
    problem_id: &str,
    answer_id: &str,
) -> PortalResult<Page<AnswerForm>> {
    Ok(match answer_detail(client, problem_id, answer_id).await? {
        Page::Ready(detail) => Page::Ready(AnswerForm::edit(&detail.answer)),
        Page::NotFound => Page::NotFound,
    })
}
