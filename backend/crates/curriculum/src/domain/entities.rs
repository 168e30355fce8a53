//! Domain Entities
//!
//! Courses group problems; problems own their model answers.

use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, CourseId, ProblemId, UserId};

use crate::domain::value_objects::normalize_optional_text;

/// Course entity
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_by_id: UserId,
    pub updated_by_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a course
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl Course {
    pub fn new(input: NewCourse, actor: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CourseId::new(),
            title: input.title,
            description: normalize_optional_text(input.description),
            is_public: input.is_public,
            created_by_id: actor,
            updated_by_id: actor,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and stamp the updater
    pub fn apply(&mut self, patch: &CoursePatch, actor: UserId) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = normalize_optional_text(Some(description.clone()));
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        self.updated_by_id = actor;
        self.updated_at = Utc::now();
    }
}

/// Course row on list pages
#[derive(Debug, Clone)]
pub struct CourseSummary {
    pub course: Course,
    /// Problems visible to the reader
    pub problem_count: i64,
}

/// Course with the problems the reader may see
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: Course,
    pub problems: Vec<Problem>,
}

/// Problem entity
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
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

#[derive(Debug, Clone)]
pub struct NewProblem {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<CourseId>,
    pub is_public: bool,
    /// Model answers created together with the problem
    pub answers: Vec<NewAnswer>,
}

#[derive(Debug, Clone, Default)]
pub struct ProblemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<CourseId>,
    pub is_public: Option<bool>,
}

impl Problem {
    /// Build the problem and its inline answers
    pub fn new(input: NewProblem, actor: UserId) -> (Self, Vec<Answer>) {
        let now = Utc::now();
        let problem = Self {
            id: ProblemId::new(),
            title: input.title,
            description: normalize_optional_text(input.description),
            is_public: input.is_public,
            course_id: input.course_id,
            created_by_id: actor,
            updated_by_id: actor,
            created_at: now,
            updated_at: now,
        };
        let answers = input
            .answers
            .into_iter()
            .map(|a| Answer::new(problem.id, a, actor))
            .collect();
        (problem, answers)
    }

    pub fn apply(&mut self, patch: &ProblemPatch, actor: UserId) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = normalize_optional_text(Some(description.clone()));
        }
        if let Some(course_id) = patch.course_id {
            self.course_id = Some(course_id);
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        self.updated_by_id = actor;
        self.updated_at = Utc::now();
    }
}

/// Id and title of a parent record
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRef {
    pub id: CourseId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRef {
    pub id: ProblemId,
    pub title: String,
}

/// Problem with its course and visible answer count
#[derive(Debug, Clone)]
pub struct ProblemWithCourse {
    pub problem: Problem,
    pub course: Option<CourseRef>,
    pub answer_count: i64,
}

/// Answer entity
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub id: AnswerId,
    pub problem_id: ProblemId,
    pub title: String,
    /// Markdown
    pub description: String,
    pub code: String,
    pub is_public: bool,
    pub created_by_id: UserId,
    pub updated_by_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub title: String,
    pub description: String,
    pub code: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AnswerPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub is_public: Option<bool>,
}

impl Answer {
    pub fn new(problem_id: ProblemId, input: NewAnswer, actor: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: AnswerId::new(),
            problem_id,
            title: input.title,
            description: input.description,
            code: input.code,
            is_public: input.is_public,
            created_by_id: actor,
            updated_by_id: actor,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: &AnswerPatch, actor: UserId) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(code) = &patch.code {
            self.code = code.clone();
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        self.updated_by_id = actor;
        self.updated_at = Utc::now();
    }
}

/// Answer with the problem it belongs to
#[derive(Debug, Clone)]
pub struct AnswerWithProblem {
    pub answer: Answer,
    pub problem: ProblemRef,
}
