//! Endpoint table
//!
//! Each constant binds a method and a path template (relative to `/api`) to
//! its request and response types. The router registers handlers at these
//! templates and the portal client is generic over them, so both sides
//! always agree on shapes.

use std::fmt;
use std::marker::PhantomData;

use axum::http::Method;
use axum::routing::MethodFilter;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::presentation::dto::{
    AnswerDetailResponse, AnswerResponse, AnswerSummaryResponse, CourseDetailResponse,
    CourseResponse, CourseSummaryResponse, CreateAnswerRequest, CreateCourseRequest,
    CreateProblemRequest, ProblemDetailResponse, ProblemResponse, ProblemSummaryResponse,
    UpdateAnswerRequest, UpdateCourseRequest, UpdateProblemRequest,
};

/// Everything but RFC 3986 unreserved characters is escaped in a segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Why path params could not fill a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParamError {
    #[error("expected {expected} params, got {got}")]
    Arity { expected: usize, got: usize },

    /// Empty and dot segments would change which route is hit
    #[error("{0:?} is not a usable path segment")]
    Segment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    pub fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests carry a JSON body
    pub const fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed endpoint: `Req` is the JSON body (`()` for none), `Res` the
/// success payload (`()` for 204).
pub struct Endpoint<Req, Res> {
    pub method: HttpMethod,
    pub path: &'static str,
    _types: PhantomData<fn(Req) -> Res>,
}

impl<Req, Res> Clone for Endpoint<Req, Res> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Req, Res> Copy for Endpoint<Req, Res> {}

impl<Req, Res> fmt::Debug for Endpoint<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

impl<Req, Res> Endpoint<Req, Res> {
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            _types: PhantomData,
        }
    }

    /// Number of `{param}` placeholders in the template
    pub fn param_count(&self) -> usize {
        self.path.matches('{').count()
    }

    /// Fill placeholders in order, percent-encoding each param as one
    /// path segment.
    pub fn path_with(&self, params: &[&str]) -> Result<String, PathParamError> {
        let expected = self.param_count();
        if params.len() != expected {
            return Err(PathParamError::Arity {
                expected,
                got: params.len(),
            });
        }

        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path;
        for param in params {
            if matches!(*param, "" | "." | "..") {
                return Err(PathParamError::Segment(param.to_string()));
            }
            // Templates are constants with balanced braces
            let (Some(open), Some(close)) = (rest.find('{'), rest.find('}')) else {
                break;
            };
            out.push_str(&rest[..open]);
            out.extend(utf8_percent_encode(param, SEGMENT));
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

// Courses
pub const LIST_COURSES: Endpoint<(), Vec<CourseSummaryResponse>> =
    Endpoint::new(HttpMethod::Get, "/courses");
pub const CREATE_COURSE: Endpoint<CreateCourseRequest, CourseResponse> =
    Endpoint::new(HttpMethod::Post, "/courses");
pub const GET_COURSE: Endpoint<(), CourseDetailResponse> =
    Endpoint::new(HttpMethod::Get, "/courses/{course_id}");
pub const UPDATE_COURSE: Endpoint<UpdateCourseRequest, CourseResponse> =
    Endpoint::new(HttpMethod::Patch, "/courses/{course_id}");
pub const DELETE_COURSE: Endpoint<(), ()> =
    Endpoint::new(HttpMethod::Delete, "/courses/{course_id}");

// Problems
pub const LIST_PROBLEMS: Endpoint<(), Vec<ProblemSummaryResponse>> =
    Endpoint::new(HttpMethod::Get, "/problems");
pub const CREATE_PROBLEM: Endpoint<CreateProblemRequest, ProblemDetailResponse> =
    Endpoint::new(HttpMethod::Post, "/problems");
pub const GET_PROBLEM: Endpoint<(), ProblemSummaryResponse> =
    Endpoint::new(HttpMethod::Get, "/problems/{problem_id}");
pub const UPDATE_PROBLEM: Endpoint<UpdateProblemRequest, ProblemResponse> =
    Endpoint::new(HttpMethod::Patch, "/problems/{problem_id}");
pub const DELETE_PROBLEM: Endpoint<(), ()> =
    Endpoint::new(HttpMethod::Delete, "/problems/{problem_id}");

// Answers
pub const LIST_ANSWERS: Endpoint<(), Vec<AnswerSummaryResponse>> =
    Endpoint::new(HttpMethod::Get, "/problems/{problem_id}/answers");
pub const CREATE_ANSWER: Endpoint<CreateAnswerRequest, AnswerResponse> =
    Endpoint::new(HttpMethod::Post, "/problems/{problem_id}/answers");
pub const GET_ANSWER: Endpoint<(), AnswerDetailResponse> =
    Endpoint::new(HttpMethod::Get, "/problems/answers/{answer_id}");
pub const UPDATE_ANSWER: Endpoint<UpdateAnswerRequest, AnswerResponse> =
    Endpoint::new(HttpMethod::Patch, "/problems/answers/{answer_id}");
pub const DELETE_ANSWER: Endpoint<(), ()> =
    Endpoint::new(HttpMethod::Delete, "/problems/answers/{answer_id}");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_with_fills_params() {
        assert_eq!(
            LIST_ANSWERS.path_with(&["abc"]).as_deref(),
            Ok("/problems/abc/answers")
        );
        assert_eq!(LIST_COURSES.path_with(&[]).as_deref(), Ok("/courses"));
        assert_eq!(
            GET_ANSWER.path_with(&["V1StGXR8_Z5jdHi6B-myT"]).as_deref(),
            Ok("/problems/answers/V1StGXR8_Z5jdHi6B-myT")
        );
    }

    #[test]
    fn test_path_with_rejects_wrong_arity() {
        assert_eq!(
            GET_COURSE.path_with(&[]),
            Err(PathParamError::Arity {
                expected: 1,
                got: 0
            })
        );
        assert!(LIST_COURSES.path_with(&["x"]).is_err());
    }

    #[test]
    fn test_path_with_keeps_params_in_one_segment() {
        assert_eq!(
            GET_COURSE.path_with(&["a/b"]).as_deref(),
            Ok("/courses/a%2Fb")
        );
        assert_eq!(
            LIST_ANSWERS.path_with(&["x?y#z"]).as_deref(),
            Ok("/problems/x%3Fy%23z/answers")
        );
        assert_eq!(
            DELETE_COURSE.path_with(&["コース 1"]).as_deref(),
            Ok("/courses/%E3%82%B3%E3%83%BC%E3%82%B9%201")
        );
    }

    #[test]
    fn test_path_with_rejects_dot_segments() {
        for bad in ["", ".", ".."] {
            assert_eq!(
                GET_COURSE.path_with(&[bad]),
                Err(PathParamError::Segment(bad.to_string()))
            );
        }
        assert!(GET_COURSE.path_with(&["..."]).is_ok());
    }

    #[test]
    fn test_body_methods() {
        assert!(CREATE_COURSE.method.has_body());
        assert!(UPDATE_ANSWER.method.has_body());
        assert!(!DELETE_PROBLEM.method.has_body());
        assert_eq!(format!("{:?}", GET_ANSWER), "GET /problems/answers/{answer_id}");
    }
}
