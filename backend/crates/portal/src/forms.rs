//! Management forms and list actions
//!
//! Forms hold the user's values, run the same `validator` rules as the
//! server before submitting, and report progress through [`Notifier`] and
//! [`Navigator`]. A failed submission keeps the values and sets an inline
//! error.

use curriculum::endpoints as ep;
use curriculum::models::{
    AnswerResponse, CourseResponse, CreateAnswerRequest, CreateCourseRequest, UpdateAnswerRequest,
    UpdateCourseRequest,
};
use curriculum::presentation::extract::describe_validation_errors;
use kernel::id::{AnswerId, CourseId, ProblemId};
use validator::Validate;

use crate::client::ApiClient;
use crate::error::PortalResult;

pub type ToastId = u64;

/// Toast notifications
pub trait Notifier {
    fn loading(&self, message: &str) -> ToastId;
    /// Replace the toast `id` (or show a new one) with a success message
    fn success(&self, id: Option<ToastId>, message: &str);
    fn error(&self, id: Option<ToastId>, message: &str);
}

/// Client-side routing
pub trait Navigator {
    fn push(&self, path: &str);
    /// Re-run the current page's loader
    fn refresh(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the navigator was sent to `redirect`
    Saved { redirect: String },
    /// Rejected locally, nothing was sent
    Invalid,
    /// The API refused or could not be reached
    Failed,
}

// ============================================================================
// Course form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFormValues {
    pub title: String,
    pub description: String,
    pub is_public: bool,
}

#[derive(Debug, Clone)]
pub struct CourseForm {
    /// Set when editing an existing course
    pub course_id: Option<CourseId>,
    pub values: CourseFormValues,
    pub error: Option<String>,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseForm {
    pub fn new() -> Self {
        Self {
            course_id: None,
            values: CourseFormValues {
                title: String::new(),
                description: String::new(),
                is_public: false,
            },
            error: None,
        }
    }

    pub fn edit(course: &CourseResponse) -> Self {
        Self {
            course_id: Some(course.id),
            values: CourseFormValues {
                title: course.title.clone(),
                description: course.description.clone().unwrap_or_default(),
                is_public: course.is_public,
            },
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.course_id.is_some()
    }

    fn request(&self) -> CreateCourseRequest {
        CreateCourseRequest {
            title: self.values.title.clone(),
            description: Some(self.values.description.clone()),
            is_public: self.values.is_public,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.request()
            .validate()
            .map_err(|errors| describe_validation_errors(&errors))
    }

    pub async fn submit<N, V>(
        &mut self,
        client: &ApiClient,
        notifier: &N,
        navigator: &V,
    ) -> SubmitOutcome
    where
        N: Notifier,
        V: Navigator,
    {
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return SubmitOutcome::Invalid;
        }
        self.error = None;

        let toast = notifier.loading(if self.is_edit() {
            "更新中..."
        } else {
            "作成中..."
        });

        let result = match self.course_id {
            Some(course_id) => {
                let req = UpdateCourseRequest {
                    title: Some(self.values.title.clone()),
                    description: Some(self.values.description.clone()),
                    is_public: Some(self.values.is_public),
                };
                client
                    .call(ep::UPDATE_COURSE, &[course_id.as_str()], Some(&req))
                    .await
            }
            None => client.call(ep::CREATE_COURSE, &[], Some(&self.request())).await,
        };

        match result {
            Ok(course) => {
                notifier.success(
                    Some(toast),
                    if self.is_edit() {
                        "コースを更新しました"
                    } else {
                        "コースを作成しました"
                    },
                );
                let redirect = format!("/manage/courses/{}", course.id);
                navigator.push(&redirect);
                navigator.refresh();
                SubmitOutcome::Saved { redirect }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Course form submission failed");
                notifier.error(
                    Some(toast),
                    if self.is_edit() {
                        "更新に失敗しました"
                    } else {
                        "作成に失敗しました"
                    },
                );
                self.error = Some(e.user_message());
                SubmitOutcome::Failed
            }
        }
    }
}

// ============================================================================
// Answer form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFormValues {
    pub title: String,
    /// Markdown
    pub description: String,
    pub code: String,
    pub is_public: bool,
}

#[derive(Debug, Clone)]
pub struct AnswerForm {
    pub problem_id: ProblemId,
    pub answer_id: Option<AnswerId>,
    pub values: AnswerFormValues,
    pub error: Option<String>,
}

impl AnswerForm {
    /// Blank form; new answers start out public here
    pub fn new(problem_id: ProblemId) -> Self {
        Self {
            problem_id,
            answer_id: None,
            values: AnswerFormValues {
                title: String::new(),
                description: String::new(),
                code: String::new(),
                is_public: true,
            },
            error: None,
        }
    }

    pub fn edit(answer: &AnswerResponse) -> Self {
        Self {
            problem_id: answer.problem_id,
            answer_id: Some(answer.id),
            values: AnswerFormValues {
                title: answer.title.clone(),
                description: answer.description.clone(),
                code: answer.code.clone(),
                is_public: answer.is_public,
            },
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.answer_id.is_some()
    }

    fn request(&self) -> CreateAnswerRequest {
        CreateAnswerRequest {
            title: self.values.title.clone(),
            description: self.values.description.clone(),
            code: self.values.code.clone(),
            is_public: self.values.is_public,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.request()
            .validate()
            .map_err(|errors| describe_validation_errors(&errors))
    }

    pub async fn submit<N, V>(
        &mut self,
        client: &ApiClient,
        notifier: &N,
        navigator: &V,
    ) -> SubmitOutcome
    where
        N: Notifier,
        V: Navigator,
    {
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return SubmitOutcome::Invalid;
        }
        self.error = None;

        let toast = notifier.loading(if self.is_edit() {
            "更新中..."
        } else {
            "作成中..."
        });

        let result = match self.answer_id {
            Some(answer_id) => {
                let req = UpdateAnswerRequest {
                    title: Some(self.values.title.clone()),
                    description: Some(self.values.description.clone()),
                    code: Some(self.values.code.clone()),
                    is_public: Some(self.values.is_public),
                };
                client
                    .call(ep::UPDATE_ANSWER, &[answer_id.as_str()], Some(&req))
                    .await
            }
            None => {
                client
                    .call(
                        ep::CREATE_ANSWER,
                        &[self.problem_id.as_str()],
                        Some(&self.request()),
                    )
                    .await
            }
        };

        match result {
            Ok(_) => {
                notifier.success(
                    Some(toast),
                    if self.is_edit() {
                        "模範解答を更新しました"
                    } else {
                        "模範解答を作成しました"
                    },
                );
                let redirect = format!("/manage/problems/{}/answers", self.problem_id);
                navigator.push(&redirect);
                navigator.refresh();
                SubmitOutcome::Saved { redirect }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Answer form submission failed");
                notifier.error(
                    Some(toast),
                    if self.is_edit() {
                        "更新に失敗しました"
                    } else {
                        "作成に失敗しました"
                    },
                );
                self.error = Some(e.user_message());
                SubmitOutcome::Failed
            }
        }
    }
}

// ============================================================================
// List actions
// ============================================================================

fn finish_delete<N, V>(result: PortalResult<()>, notifier: &N, navigator: &V) -> bool
where
    N: Notifier,
    V: Navigator,
{
    match result {
        Ok(()) => {
            notifier.success(None, "削除しました");
            navigator.refresh();
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Delete failed");
            notifier.error(None, "削除に失敗しました");
            false
        }
    }
}

/// Delete a course from the course list
pub async fn delete_course<N, V>(
    client: &ApiClient,
    course_id: &str,
    notifier: &N,
    navigator: &V,
) -> bool
where
    N: Notifier,
    V: Navigator,
{
    let result = client.call(ep::DELETE_COURSE, &[course_id], None).await;
    finish_delete(result, notifier, navigator)
}

/// Delete an answer from a problem's answer list
pub async fn delete_answer<N, V>(
    client: &ApiClient,
    answer_id: &str,
    notifier: &N,
    navigator: &V,
) -> bool
where
    N: Notifier,
    V: Navigator,
{
    let result = client.call(ep::DELETE_ANSWER, &[answer_id], None).await;
    finish_delete(result, notifier, navigator)
}
