//! Request extractors
//!
//! Path ids and JSON bodies are checked here so handlers only see values
//! that already passed validation. Rejections are `CurriculumError::Validation`
//! and render as 400 with field detail.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use kernel::id::Id;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CurriculumError;

/// A single `{..._id}` path segment parsed as a typed id
#[derive(Debug, Clone, Copy)]
pub struct IdPath<M>(pub Id<M>);

impl<S, M> FromRequestParts<S> for IdPath<M>
where
    S: Send + Sync,
{
    type Rejection = CurriculumError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CurriculumError::Validation(rejection.body_text()))?;

        Id::parse_str(&raw)
            .map(IdPath)
            .map_err(|e| CurriculumError::Validation(e.message().to_string()))
    }
}

/// JSON body that passed `validator` rules
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = CurriculumError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CurriculumError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| CurriculumError::Validation(describe_validation_errors(&errors)))?;

        Ok(Self(value))
    }
}

/// `field: message` lines, sorted, joined with `; `.
/// Nested paths read `answers[0].title`.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect_messages(errors, "", &mut lines);
    lines.sort();
    lines.join("; ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error.message.as_deref().unwrap_or(&error.code);
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dto::{CreateProblemRequest, NewAnswerRequest};

    #[test]
    fn test_describe_nested_errors() {
        let req = CreateProblemRequest {
            title: String::new(),
            description: None,
            course_id: None,
            is_public: false,
            answers: vec![NewAnswerRequest {
                title: String::new(),
                description: String::new(),
                code: String::new(),
                is_public: true,
            }],
        };

        let errors = req.validate().unwrap_err();
        assert_eq!(
            describe_validation_errors(&errors),
            "answers[0].title: タイトルは必須です; title: タイトルは必須です"
        );
    }
}
