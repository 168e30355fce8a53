//! View models
//!
//! Plain data the page templates render: badges, formatted timestamps,
//! description excerpts and list rows with their empty states.

use chrono::{DateTime, FixedOffset, Utc};
use curriculum::models::{
    AnswerSummaryResponse, CourseSummaryResponse, ProblemResponse, ProblemSummaryResponse,
};

pub const MSG_NO_COURSES: &str = "コースがありません";
pub const MSG_NO_PROBLEMS_IN_COURSE: &str =
    "このコースにはまだ問題がありません。「新規問題を追加」から作成してください。";
pub const MSG_NO_ANSWERS: &str = "この問題にはまだ模範解答がありません。";

/// Excerpt length on management pages
pub const MANAGE_EXCERPT_CHARS: usize = 80;
/// Excerpt length on student pages
pub const STUDENT_EXCERPT_CHARS: usize = 100;

const JST_OFFSET_SECS: i32 = 9 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub variant: BadgeVariant,
}

pub fn visibility_badge(is_public: bool) -> Badge {
    if is_public {
        Badge {
            label: "公開",
            variant: BadgeVariant::Default,
        }
    } else {
        Badge {
            label: "非公開",
            variant: BadgeVariant::Secondary,
        }
    }
}

/// `YYYY/MM/DD HH:mm` in Japan Standard Time
pub fn format_jst(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(jst) => at.with_timezone(&jst).format("%Y/%m/%d %H:%M").to_string(),
        None => at.format("%Y/%m/%d %H:%M").to_string(),
    }
}

/// Heading markers removed, trimmed, cut to `limit` characters.
/// The ellipsis follows the length of the raw description.
pub fn excerpt(description: &str, limit: usize) -> String {
    let stripped = description.replace('#', "");
    let mut out: String = stripped.trim().chars().take(limit).collect();
    if description.chars().count() > limit {
        out.push('…');
    }
    out
}

/// Rows, or the message shown in their place
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Empty(&'static str),
    Rows(Vec<T>),
}

impl<T> ListView<T> {
    pub fn new(rows: Vec<T>, empty_message: &'static str) -> Self {
        if rows.is_empty() {
            ListView::Empty(empty_message)
        } else {
            ListView::Rows(rows)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListView::Empty(_) => 0,
            ListView::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ListView::Empty(_) => &[],
            ListView::Rows(rows) => rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    pub id: String,
    pub title: String,
    pub badge: Badge,
    pub problem_count: i64,
    pub href: String,
}

impl From<&CourseSummaryResponse> for CourseRow {
    fn from(c: &CourseSummaryResponse) -> Self {
        Self {
            id: c.course.id.to_string(),
            title: c.course.title.clone(),
            badge: visibility_badge(c.course.is_public),
            problem_count: c.problem_count,
            href: format!("/manage/courses/{}", c.course.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRow {
    pub id: String,
    pub title: String,
    pub badge: Badge,
    pub updated_at: String,
    pub href: String,
}

impl From<&ProblemResponse> for ProblemRow {
    fn from(p: &ProblemResponse) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            badge: visibility_badge(p.is_public),
            updated_at: format_jst(p.updated_at),
            href: format!("/manage/problems/{}", p.id),
        }
    }
}

impl From<&ProblemSummaryResponse> for ProblemRow {
    fn from(p: &ProblemSummaryResponse) -> Self {
        ProblemRow::from(&p.problem)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRow {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub badge: Badge,
    pub updated_at: String,
}

impl AnswerRow {
    pub fn new(answer: &AnswerSummaryResponse, excerpt_chars: usize) -> Self {
        Self {
            id: answer.id.to_string(),
            title: answer.title.clone(),
            excerpt: excerpt(&answer.description, excerpt_chars),
            badge: visibility_badge(answer.is_public),
            updated_at: format_jst(answer.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_badges() {
        assert_eq!(visibility_badge(true).label, "公開");
        assert_eq!(visibility_badge(false).label, "非公開");
        assert_eq!(visibility_badge(false).variant, BadgeVariant::Secondary);
    }

    #[test]
    fn test_format_jst_crosses_midnight() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 15, 30, 0).unwrap();
        assert_eq!(format_jst(at), "2026/01/01 00:30");
    }

    #[test]
    fn test_excerpt_strips_headings() {
        assert_eq!(excerpt("## 解説\n本文", 80), "解説\n本文");
        assert_eq!(excerpt("", 80), "");
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let long = "あ".repeat(120);
        let short = excerpt(&long, MANAGE_EXCERPT_CHARS);
        assert_eq!(short.chars().count(), MANAGE_EXCERPT_CHARS + 1);
        assert!(short.ends_with('…'));

        let student = excerpt(&long, STUDENT_EXCERPT_CHARS);
        assert_eq!(student.chars().count(), STUDENT_EXCERPT_CHARS + 1);

        assert!(!excerpt("short", MANAGE_EXCERPT_CHARS).ends_with('…'));
    }

    #[test]
    fn test_list_view_empty_state() {
        let view: ListView<u8> = ListView::new(vec![], MSG_NO_COURSES);
        assert_eq!(view, ListView::Empty(MSG_NO_COURSES));
        assert!(view.is_empty());

        let view = ListView::new(vec![1, 2], MSG_NO_COURSES);
        assert_eq!(view.rows(), &[1, 2]);
    }
}
