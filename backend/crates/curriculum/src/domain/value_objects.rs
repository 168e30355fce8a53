//! Domain Value Objects
//!
//! Small immutable types shared by the curriculum entities and errors.

use std::fmt;

/// Which record type an operation touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Problem,
    Answer,
}

impl EntityKind {
    pub const fn code(&self) -> &'static str {
        match self {
            EntityKind::Course => "course",
            EntityKind::Problem => "problem",
            EntityKind::Answer => "answer",
        }
    }

    /// Label used in user-facing messages
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Course => "コース",
            EntityKind::Problem => "問題",
            EntityKind::Answer => "解答",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const fn code(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Get => "get",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Action::List | Action::Get => "取得",
            Action::Create => "作成",
            Action::Update => "更新",
            Action::Delete => "削除",
        }
    }
}

/// An (entity, action) pair, attached to unexpected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub entity: EntityKind,
    pub action: Action,
}

impl Operation {
    pub const fn new(entity: EntityKind, action: Action) -> Self {
        Self { entity, action }
    }

    /// e.g. `解答の作成中にエラーが発生しました`
    pub fn failure_message(&self) -> String {
        format!(
            "{}の{}中にエラーが発生しました",
            self.entity.label(),
            self.action.label()
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action.code(), self.entity.code())
    }
}

/// Blank optional text is stored as absent
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
