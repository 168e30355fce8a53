//! API DTOs (Data Transfer Objects)
//!
//! Request bodies are validated with `validator` before they reach a use
//! case. Every type is `Serialize + Deserialize` so the portal client binds
//! to the very same shapes.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, CourseId, ProblemId, UserId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{
    Answer, AnswerPatch, AnswerWithProblem, Course, CourseDetail, CoursePatch, CourseRef,
    CourseSummary, NewAnswer, NewCourse, NewProblem, Problem, ProblemPatch, ProblemRef,
    ProblemWithCourse,
};

pub const MAX_TITLE_CHARS: usize = 200;

pub const MSG_COURSE_TITLE_REQUIRED: &str = "コース名は必須です";
pub const MSG_TITLE_REQUIRED: &str = "タイトルは必須です";
pub const MSG_TITLE_TOO_LONG: &str = "タイトルは200文字以内で入力してください";

fn check_title(value: &str, required_message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(required_message)));
    }
    if value.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed(MSG_TITLE_TOO_LONG)));
    }
    Ok(())
}

/// Course names
pub fn validate_course_title(value: &str) -> Result<(), ValidationError> {
    check_title(value, MSG_COURSE_TITLE_REQUIRED)
}

/// Problem and answer titles
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    check_title(value, MSG_TITLE_REQUIRED)
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Course
// ============================================================================

/// Request for POST /api/courses
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(custom(function = "validate_course_title"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(req: CreateCourseRequest) -> Self {
        NewCourse {
            title: req.title,
            description: req.description,
            is_public: req.is_public,
        }
    }
}

/// Request for PATCH /api/courses/{course_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_course_title"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl From<UpdateCourseRequest> for CoursePatch {
    fn from(req: UpdateCourseRequest) -> Self {
        CoursePatch {
            title: req.title,
            description: req.description,
            is_public: req.is_public,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_by_id: UserId,
    pub updated_by_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            is_public: course.is_public,
            created_by_id: course.created_by_id,
            updated_by_id: course.updated_by_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// Row of GET /api/courses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub problem_count: i64,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(summary: CourseSummary) -> Self {
        Self {
            course: summary.course.into(),
            problem_count: summary.problem_count,
        }
    }
}

/// Response for GET /api/courses/{course_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub problems: Vec<ProblemResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        Self {
            course: detail.course.into(),
            problems: detail.problems.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRefResponse {
    pub id: CourseId,
    pub title: String,
}

impl From<CourseRef> for CourseRefResponse {
    fn from(r: CourseRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

// ============================================================================
// Problem
// ============================================================================

/// Request for POST /api/problems
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    #[validate(nested)]
    pub answers: Vec<NewAnswerRequest>,
}

/// Model answer submitted inline with a new problem
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswerRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    /// Inline answers are published unless stated otherwise
    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl From<NewAnswerRequest> for NewAnswer {
    fn from(req: NewAnswerRequest) -> Self {
        NewAnswer {
            title: req.title,
            description: req.description,
            code: req.code,
            is_public: req.is_public,
        }
    }
}

impl From<CreateProblemRequest> for NewProblem {
    fn from(req: CreateProblemRequest) -> Self {
        NewProblem {
            title: req.title,
            description: req.description,
            course_id: req.course_id,
            is_public: req.is_public,
            answers: req.answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request for PATCH /api/problems/{problem_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProblemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl From<UpdateProblemRequest> for ProblemPatch {
    fn from(req: UpdateProblemRequest) -> Self {
        ProblemPatch {
            title: req.title,
            description: req.description,
            course_id: req.course_id,
            is_public: req.is_public,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub id: ProblemId,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub course_id: Option<CourseId>,
    pub created_by_id: UserId,
    pub updated_by_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Problem> for ProblemResponse {
    fn from(problem: Problem) -> Self {
        Self {
            id: problem.id,
            title: problem.title,
            description: problem.description,
            is_public: problem.is_public,
            course_id: problem.course_id,
            created_by_id: problem.created_by_id,
            updated_by_id: problem.updated_by_id,
            created_at: problem.created_at,
            updated_at: problem.updated_at,
        }
    }
}

/// Response for GET /api/problems and GET /api/problems/{problem_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummaryResponse {
    #[serde(flatten)]
    pub problem: ProblemResponse,
    pub course: Option<CourseRefResponse>,
    pub answer_count: i64,
}

impl From<ProblemWithCourse> for ProblemSummaryResponse {
    fn from(row: ProblemWithCourse) -> Self {
        Self {
            problem: row.problem.into(),
            course: row.course.map(Into::into),
            answer_count: row.answer_count,
        }
    }
}

/// Response for POST /api/problems
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetailResponse {
    #[serde(flatten)]
    pub problem: ProblemResponse,
    pub answers: Vec<AnswerResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRefResponse {
    pub id: ProblemId,
    pub title: String,
}

impl From<ProblemRef> for ProblemRefResponse {
    fn from(r: ProblemRef) -> Self {
        Self {
            id: r.id,
            title: r.title,
        }
    }
}

// ============================================================================
// Answer
// ============================================================================

/// Request for POST /api/problems/{problem_id}/answers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    pub description: String,
    pub code: String,
    #[serde(default)]
    pub is_public: bool,
}

impl From<CreateAnswerRequest> for NewAnswer {
    fn from(req: CreateAnswerRequest) -> Self {
        NewAnswer {
            title: req.title,
            description: req.description,
            code: req.code,
            is_public: req.is_public,
        }
    }
}

/// Request for PATCH /api/problems/answers/{answer_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl From<UpdateAnswerRequest> for AnswerPatch {
    fn from(req: UpdateAnswerRequest) -> Self {
        AnswerPatch {
            title: req.title,
            description: req.description,
            code: req.code,
            is_public: req.is_public,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub id: AnswerId,
    pub problem_id: ProblemId,
    pub title: String,
    pub description: String,
    pub code: String,
    pub is_public: bool,
    pub created_by_id: UserId,
    pub updated_by_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id,
            problem_id: answer.problem_id,
            title: answer.title,
            description: answer.description,
            code: answer.code,
            is_public: answer.is_public,
            created_by_id: answer.created_by_id,
            updated_by_id: answer.updated_by_id,
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}

/// Row of GET /api/problems/{problem_id}/answers (code omitted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSummaryResponse {
    pub id: AnswerId,
    pub problem_id: ProblemId,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub updated_by_id: UserId,
    pub updated_at: DateTime<Utc>,
}

impl From<Answer> for AnswerSummaryResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id,
            problem_id: answer.problem_id,
            title: answer.title,
            description: answer.description,
            is_public: answer.is_public,
            updated_by_id: answer.updated_by_id,
            updated_at: answer.updated_at,
        }
    }
}

/// Response for GET /api/problems/answers/{answer_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetailResponse {
    #[serde(flatten)]
    pub answer: AnswerResponse,
    pub problem: ProblemRefResponse,
}

impl From<AnswerWithProblem> for AnswerDetailResponse {
    fn from(row: AnswerWithProblem) -> Self {
        Self {
            answer: row.answer.into(),
            problem: row.problem.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_defaults_to_private() {
        let req: CreateCourseRequest = serde_json::from_str(r#"{"title":"Algo101"}"#).unwrap();
        assert!(!req.is_public);
        assert!(req.description.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_inline_answer_defaults_to_public() {
        let req: CreateProblemRequest = serde_json::from_str(
            r#"{"title":"Two Sum","answers":[{"title":"hash map"}]}"#,
        )
        .unwrap();
        assert!(!req.is_public);
        assert!(req.answers[0].is_public);
        assert_eq!(req.answers[0].code, "");
    }

    #[test]
    fn test_create_answer_defaults_to_private() {
        let req: CreateAnswerRequest =
            serde_json::from_str(r#"{"title":"dp","description":"","code":""}"#).unwrap();
        assert!(!req.is_public);
    }

    #[test]
    fn test_blank_title_rejected() {
        let req = CreateCourseRequest {
            title: "   ".into(),
            description: None,
            is_public: false,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_long_title_rejected() {
        assert!(validate_title(&"あ".repeat(MAX_TITLE_CHARS)).is_ok());
        assert!(validate_title(&"あ".repeat(MAX_TITLE_CHARS + 1)).is_err());
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let req = UpdateCourseRequest {
            is_public: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "isPublic": true }));
    }

    #[test]
    fn test_summary_flattens_course_fields() {
        let course = Course::new(
            NewCourse {
                title: "Algo101".into(),
                description: None,
                is_public: true,
            },
            UserId::new(),
        );
        let json = serde_json::to_value(CourseSummaryResponse::from(CourseSummary {
            course,
            problem_count: 3,
        }))
        .unwrap();
        assert_eq!(json["title"], "Algo101");
        assert_eq!(json["isPublic"], true);
        assert_eq!(json["problemCount"], 3);
    }
}
