//! Unit tests for curriculum crate
//!
//! HTTP tests run the real router over the in-memory stores.

#[cfg(test)]
mod support {
    use auth::{AuthConfig, InMemoryAuthSessionRepository, SessionGate, UserRole};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use kernel::id::UserId;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::infra::memory::InMemoryCurriculumRepository;
    use crate::presentation::router::curriculum_router_generic;

    pub struct TestApp {
        pub router: Router,
        pub store: InMemoryCurriculumRepository,
        pub admin: String,
        pub admin_id: UserId,
        pub other_admin: String,
        pub other_admin_id: UserId,
        pub student: String,
    }

    impl TestApp {
        pub async fn new() -> Self {
            let sessions = InMemoryAuthSessionRepository::new();
            let config = AuthConfig::with_random_secret();

            let admin_id = UserId::new();
            let other_admin_id = UserId::new();
            let admin = sessions.sign_in(&config, admin_id, UserRole::Admin).await;
            let other_admin = sessions
                .sign_in(&config, other_admin_id, UserRole::Admin)
                .await;
            let student = sessions
                .sign_in(&config, UserId::new(), UserRole::Student)
                .await;

            let store = InMemoryCurriculumRepository::new();
            let gate = SessionGate::new(sessions, config);
            let router =
                Router::new().nest("/api", curriculum_router_generic(store.clone(), gate));

            Self {
                router,
                store,
                admin,
                admin_id,
                other_admin,
                other_admin_id,
                student,
            }
        }

        pub async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::COOKIE, format!("auth_session={token}"));
            }
            let request = match body {
                Some(json) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let res = self.router.clone().oneshot(request).await.unwrap();
            let status = res.status();
            let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        pub async fn send_raw(&self, uri: &str, token: &str, raw: &str) -> (StatusCode, Value) {
            let request = Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::COOKIE, format!("auth_session={token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(raw.to_string()))
                .unwrap();

            let res = self.router.clone().oneshot(request).await.unwrap();
            let status = res.status();
            let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        pub async fn admin_post(&self, uri: &str, body: Value) -> Value {
            let (status, json) = self
                .send(Method::POST, uri, Some(&self.admin), Some(body))
                .await;
            assert_eq!(status, StatusCode::OK, "{json}");
            json
        }
    }
}

#[cfg(test)]
mod gate_tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::support::TestApp;

    #[tokio::test]
    async fn test_list_without_session_is_403() {
        let app = TestApp::new().await;
        let (status, body) = app.send(Method::GET, "/api/courses", None, None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], auth::error::MSG_LOGIN_REQUIRED);

        let (status, _) = app
            .send(Method::GET, "/api/courses", Some("not-a-token"), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/courses",
                None,
                Some(json!({ "title": "Algo101" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], auth::error::MSG_LOGIN_REQUIRED);
        assert_eq!(app.store.counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_student_mutations_are_403_without_side_effects() {
        let app = TestApp::new().await;
        let course = app
            .admin_post("/api/courses", json!({ "title": "Algo101" }))
            .await;
        let course_uri = format!("/api/courses/{}", course["id"].as_str().unwrap());

        let (status, body) = app
            .send(
                Method::POST,
                "/api/courses",
                Some(&app.student),
                Some(json!({ "title": "Sneaky" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], auth::error::MSG_ADMIN_REQUIRED);

        let (status, _) = app
            .send(Method::DELETE, &course_uri, Some(&app.student), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        assert_eq!(app.store.counts().await, (1, 0, 0));
    }

    #[tokio::test]
    async fn test_gate_runs_before_body_validation() {
        let app = TestApp::new().await;
        let (status, _) = app
            .send(
                Method::POST,
                "/api/courses",
                Some(&app.student),
                Some(json!({ "title": "" })),
            )
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[cfg(test)]
mod course_tests {
    use axum::http::{Method, StatusCode};
    use kernel::id::CourseId;
    use serde_json::json;

    use super::support::TestApp;
    use crate::error::{MSG_COURSE_NOT_FOUND, MSG_INVALID_INPUT};

    #[tokio::test]
    async fn test_create_get_delete_roundtrip() {
        let app = TestApp::new().await;
        let created = app
            .admin_post(
                "/api/courses",
                json!({ "title": "Algo101", "isPublic": false }),
            )
            .await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 21);
        assert_eq!(created["title"], "Algo101");
        assert_eq!(created["createdById"], app.admin_id.to_string());

        let uri = format!("/api/courses/{id}");
        let (status, fetched) = app.send(Method::GET, &uri, Some(&app.admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], created["id"]);
        assert_eq!(fetched["title"], "Algo101");
        assert_eq!(fetched["problems"], json!([]));

        let (status, body) = app
            .send(Method::DELETE, &uri, Some(&app.admin), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, body) = app.send(Method::GET, &uri, Some(&app.admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_COURSE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_defaults_to_private() {
        let app = TestApp::new().await;
        let created = app
            .admin_post("/api/courses", json!({ "title": "Algo101" }))
            .await;

        assert_eq!(created["isPublic"], false);
        assert!(created["description"].is_null());
    }

    #[tokio::test]
    async fn test_delete_missing_is_404() {
        let app = TestApp::new().await;
        let uri = format!("/api/courses/{}", CourseId::new());
        let (status, body) = app
            .send(Method::DELETE, &uri, Some(&app.admin), None)
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_COURSE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields_and_stamps_updater() {
        let app = TestApp::new().await;
        let created = app
            .admin_post(
                "/api/courses",
                json!({ "title": "Algo101", "description": "intro", "isPublic": false }),
            )
            .await;
        let uri = format!("/api/courses/{}", created["id"].as_str().unwrap());

        let (status, updated) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&app.other_admin),
                Some(json!({ "isPublic": true })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Algo101");
        assert_eq!(updated["description"], "intro");
        assert_eq!(updated["isPublic"], true);
        assert_eq!(updated["createdById"], app.admin_id.to_string());
        assert_eq!(updated["updatedById"], app.other_admin_id.to_string());
    }

    #[tokio::test]
    async fn test_update_missing_is_404() {
        let app = TestApp::new().await;
        let uri = format!("/api/courses/{}", CourseId::new());
        let (status, _) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&app.admin),
                Some(json!({ "title": "x" })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_title_is_400_with_field_detail() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/courses",
                Some(&app.admin),
                Some(json!({ "title": "" })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_INVALID_INPUT);
        assert_eq!(body["details"], "title: コース名は必須です");
        assert_eq!(app.store.counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_raw("/api/courses", &app.admin, "{\"title\":")
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_INVALID_INPUT);
        assert!(body["details"].as_str().unwrap().chars().count() <= 200);
    }

    #[tokio::test]
    async fn test_invalid_id_is_400() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send(
                Method::GET,
                "/api/courses/not-a-nanoid",
                Some(&app.admin),
                None,
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_student_sees_public_courses_only() {
        let app = TestApp::new().await;
        let public = app
            .admin_post("/api/courses", json!({ "title": "Open", "isPublic": true }))
            .await;
        let hidden = app
            .admin_post("/api/courses", json!({ "title": "Draft" }))
            .await;
        let course_id = public["id"].as_str().unwrap();
        app.admin_post(
            "/api/problems",
            json!({ "title": "P1", "courseId": course_id, "isPublic": true }),
        )
        .await;
        app.admin_post(
            "/api/problems",
            json!({ "title": "P2", "courseId": course_id }),
        )
        .await;

        let (status, list) = app
            .send(Method::GET, "/api/courses", Some(&app.student), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "Open");
        assert_eq!(list[0]["problemCount"], 1);

        let (_, list) = app
            .send(Method::GET, "/api/courses", Some(&app.admin), None)
            .await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let uri = format!("/api/courses/{}", hidden["id"].as_str().unwrap());
        let (status, _) = app.send(Method::GET, &uri, Some(&app.student), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let app = TestApp::new().await;
        let first = app
            .admin_post("/api/courses", json!({ "title": "First" }))
            .await;
        app.admin_post("/api/courses", json!({ "title": "Second" }))
            .await;

        // Touch the older course so it becomes the most recently updated
        let uri = format!("/api/courses/{}", first["id"].as_str().unwrap());
        app.send(
            Method::PATCH,
            &uri,
            Some(&app.admin),
            Some(json!({ "description": "again" })),
        )
        .await;

        let (_, list) = app
            .send(Method::GET, "/api/courses", Some(&app.admin), None)
            .await;
        assert_eq!(list[0]["title"], "First");
        assert_eq!(list[1]["title"], "Second");
    }
}

#[cfg(test)]
mod problem_tests {
    use axum::http::{Method, StatusCode};
    use kernel::id::{CourseId, ProblemId};
    use serde_json::json;

    use super::support::TestApp;
    use crate::error::{MSG_COURSE_NOT_FOUND, MSG_PROBLEM_NOT_FOUND};

    #[tokio::test]
    async fn test_create_with_inline_answers() {
        let app = TestApp::new().await;
        let created = app
            .admin_post(
                "/api/problems",
                json!({
                    "title": "Two Sum",
                    "answers": [
                        { "title": "hash map", "code": "print(1)" },
                        { "title": "brute force", "isPublic": false }
                    ]
                }),
            )
            .await;

        assert_eq!(created["isPublic"], false);
        let answers = created["answers"].as_array().unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0]["isPublic"], true);
        assert_eq!(answers[0]["problemId"], created["id"]);
        assert_eq!(answers[1]["isPublic"], false);
        assert_eq!(app.store.counts().await, (0, 1, 2));
    }

    #[tokio::test]
    async fn test_inline_answer_validation_rejects_whole_request() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/problems",
                Some(&app.admin),
                Some(json!({ "title": "Two Sum", "answers": [{ "title": "" }] })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], "answers[0].title: タイトルは必須です");
        assert_eq!(app.store.counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_dangling_course_is_404() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/problems",
                Some(&app.admin),
                Some(json!({ "title": "Orphan", "courseId": CourseId::new().to_string() })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_COURSE_NOT_FOUND);
        assert_eq!(app.store.counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_get_includes_course_and_answer_count() {
        let app = TestApp::new().await;
        let course = app
            .admin_post("/api/courses", json!({ "title": "Algo101" }))
            .await;
        let problem = app
            .admin_post(
                "/api/problems",
                json!({
                    "title": "Two Sum",
                    "courseId": course["id"],
                    "answers": [{ "title": "a" }, { "title": "b" }]
                }),
            )
            .await;

        let uri = format!("/api/problems/{}", problem["id"].as_str().unwrap());
        let (status, body) = app.send(Method::GET, &uri, Some(&app.admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["course"]["title"], "Algo101");
        assert_eq!(body["course"]["id"], course["id"]);
        assert_eq!(body["answerCount"], 2);
    }

    #[tokio::test]
    async fn test_deleting_course_detaches_problems() {
        let app = TestApp::new().await;
        let course = app
            .admin_post("/api/courses", json!({ "title": "Algo101" }))
            .await;
        let problem = app
            .admin_post(
                "/api/problems",
                json!({ "title": "Two Sum", "courseId": course["id"] }),
            )
            .await;

        let uri = format!("/api/courses/{}", course["id"].as_str().unwrap());
        let (status, _) = app
            .send(Method::DELETE, &uri, Some(&app.admin), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/api/problems/{}", problem["id"].as_str().unwrap());
        let (status, body) = app.send(Method::GET, &uri, Some(&app.admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["courseId"].is_null());
        assert!(body["course"].is_null());
    }

    #[tokio::test]
    async fn test_deleting_problem_removes_answers() {
        let app = TestApp::new().await;
        let problem = app
            .admin_post(
                "/api/problems",
                json!({ "title": "Two Sum", "answers": [{ "title": "a" }] }),
            )
            .await;

        let uri = format!("/api/problems/{}", problem["id"].as_str().unwrap());
        let (status, _) = app
            .send(Method::DELETE, &uri, Some(&app.admin), None)
            .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(app.store.counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_404() {
        let app = TestApp::new().await;
        let uri = format!("/api/problems/{}", ProblemId::new());

        let (status, body) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&app.admin),
                Some(json!({ "title": "x" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_PROBLEM_NOT_FOUND);

        let (status, _) = app
            .send(Method::DELETE, &uri, Some(&app.admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_student_list_hides_private_problems() {
        let app = TestApp::new().await;
        app.admin_post("/api/problems", json!({ "title": "Open", "isPublic": true }))
            .await;
        app.admin_post("/api/problems", json!({ "title": "Draft" }))
            .await;

        let (status, list) = app
            .send(Method::GET, "/api/problems", Some(&app.student), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "Open");
    }
}

#[cfg(test)]
mod answer_tests {
    use axum::http::{Method, StatusCode};
    use kernel::id::{AnswerId, ProblemId};
    use serde_json::{Value, json};

    use super::support::TestApp;
    use crate::error::{MSG_ANSWER_NOT_FOUND, MSG_PROBLEM_NOT_FOUND};

    async fn public_problem(app: &TestApp) -> Value {
        app.admin_post("/api/problems", json!({ "title": "Two Sum", "isPublic": true }))
            .await
    }

    fn answer_body(title: &str) -> Value {
        json!({ "title": title, "description": "## 解説", "code": "print(1)" })
    }

    #[tokio::test]
    async fn test_create_defaults_to_private() {
        let app = TestApp::new().await;
        let problem = public_problem(&app).await;
        let uri = format!("/api/problems/{}/answers", problem["id"].as_str().unwrap());

        let answer = app.admin_post(&uri, answer_body("dp")).await;

        assert_eq!(answer["isPublic"], false);
        assert_eq!(answer["problemId"], problem["id"]);
        assert_eq!(answer["code"], "print(1)");
    }

    #[tokio::test]
    async fn test_create_on_missing_problem_is_404() {
        let app = TestApp::new().await;
        let uri = format!("/api/problems/{}/answers", ProblemId::new());
        let (status, body) = app
            .send(Method::POST, &uri, Some(&app.admin), Some(answer_body("dp")))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_PROBLEM_NOT_FOUND);
        assert_eq!(app.store.counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_list_omits_code_and_hides_private_for_students() {
        let app = TestApp::new().await;
        let problem = public_problem(&app).await;
        let uri = format!("/api/problems/{}/answers", problem["id"].as_str().unwrap());
        app.admin_post(&uri, answer_body("hidden")).await;
        let mut open = answer_body("open");
        open["isPublic"] = json!(true);
        app.admin_post(&uri, open).await;

        let (status, list) = app.send(Method::GET, &uri, Some(&app.student), None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "open");
        assert!(list[0].get("code").is_none());

        let (_, list) = app.send(Method::GET, &uri, Some(&app.admin), None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_for_hidden_problem_is_404_for_students() {
        let app = TestApp::new().await;
        let problem = app
            .admin_post("/api/problems", json!({ "title": "Draft" }))
            .await;
        let uri = format!("/api/problems/{}/answers", problem["id"].as_str().unwrap());

        let (status, body) = app.send(Method::GET, &uri, Some(&app.student), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_PROBLEM_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_update_delete() {
        let app = TestApp::new().await;
        let problem = public_problem(&app).await;
        let uri = format!("/api/problems/{}/answers", problem["id"].as_str().unwrap());
        let answer = app.admin_post(&uri, answer_body("dp")).await;
        let answer_uri = format!("/api/problems/answers/{}", answer["id"].as_str().unwrap());

        let (status, detail) = app
            .send(Method::GET, &answer_uri, Some(&app.admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["problem"]["title"], "Two Sum");
        assert_eq!(detail["code"], "print(1)");

        let (status, updated) = app
            .send(
                Method::PATCH,
                &answer_uri,
                Some(&app.other_admin),
                Some(json!({ "code": "print(2)" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["code"], "print(2)");
        assert_eq!(updated["title"], "dp");
        assert_eq!(updated["description"], "## 解説");
        assert_eq!(updated["isPublic"], false);
        assert_eq!(updated["updatedById"], app.other_admin_id.to_string());

        let (status, _) = app
            .send(Method::DELETE, &answer_uri, Some(&app.admin), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .send(Method::GET, &answer_uri, Some(&app.admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], MSG_ANSWER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_private_answer_is_404_for_students() {
        let app = TestApp::new().await;
        let problem = public_problem(&app).await;
        let uri = format!("/api/problems/{}/answers", problem["id"].as_str().unwrap());
        let answer = app.admin_post(&uri, answer_body("dp")).await;
        let answer_uri = format!("/api/problems/answers/{}", answer["id"].as_str().unwrap());

        let (status, _) = app
            .send(Method::GET, &answer_uri, Some(&app.student), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_is_404() {
        let app = TestApp::new().await;
        let uri = format!("/api/problems/answers/{}", AnswerId::new());
        let (status, _) = app
            .send(Method::DELETE, &uri, Some(&app.admin), None)
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::error::body::ErrorBody;

    use crate::domain::value_objects::{Action, EntityKind, Operation};
    use crate::error::*;

    async fn body_of(err: CurriculumError) -> (StatusCode, ErrorBody) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CurriculumError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CurriculumError::CourseNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CurriculumError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_during_leaves_expected_outcomes_alone() {
        let op = Operation::new(EntityKind::Answer, Action::Update);
        assert!(matches!(
            CurriculumError::AnswerNotFound.during(op),
            CurriculumError::AnswerNotFound
        ));
        assert!(matches!(
            CurriculumError::Internal("boom".into()).during(op),
            CurriculumError::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_failure_names_operation_and_hides_raw_text() {
        let op = Operation::new(EntityKind::Course, Action::Update);
        let err = CurriculumError::Internal("connection string with password".into()).during(op);

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "コースの更新中にエラーが発生しました");
        assert_eq!(body.details.as_deref(), Some("Internal error"));
    }

    #[tokio::test]
    async fn test_database_failure_details_are_summarized() {
        let op = Operation::new(EntityKind::Problem, Action::Create);
        let err = CurriculumError::Database(sqlx::Error::PoolTimedOut).during(op);

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "問題の作成中にエラーが発生しました");
        assert!(!body.details.unwrap_or_default().contains("PoolTimedOut"));
    }

    #[test]
    fn test_failure_keeps_cause_for_the_log() {
        use std::error::Error;

        let op = Operation::new(EntityKind::Answer, Action::Delete);
        let app: kernel::error::app_error::AppError =
            CurriculumError::Database(sqlx::Error::PoolTimedOut)
                .during(op)
                .into();

        assert_eq!(app.message(), "解答の削除中にエラーが発生しました");
        let cause = app.source().expect("cause attached");
        assert!(format!("{cause:?}").contains("PoolTimedOut"));
    }

    #[tokio::test]
    async fn test_validation_body() {
        let (status, body) =
            body_of(CurriculumError::Validation("title: タイトルは必須です".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, MSG_INVALID_INPUT);
        assert_eq!(body.details.as_deref(), Some("title: タイトルは必須です"));
    }
}

/// Store tests against a real database.
///
/// Run with `DATABASE_URL` set and `cargo test -p curriculum -- --ignored`;
/// each test gets a fresh database with the migrations applied.
#[cfg(test)]
mod postgres_tests {
    use auth::ReadScope;
    use kernel::id::{CourseId, ProblemId, UserId};
    use sqlx::PgPool;

    use crate::domain::entities::{
        Answer, AnswerPatch, Course, CoursePatch, NewAnswer, NewCourse, NewProblem, Problem,
        ProblemPatch,
    };
    use crate::domain::repository::{AnswerRepository, CourseRepository, ProblemRepository};
    use crate::error::CurriculumError;
    use crate::infra::postgres::PgCurriculumRepository;

    async fn seed_user(pool: &PgPool, name: &str) -> UserId {
        let id = UserId::new();
        sqlx::query("INSERT INTO users (id, user_name, user_role) VALUES ($1, $2, 1)")
            .bind(id.as_str())
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
        id
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn new_course(actor: UserId) -> Course {
        Course::new(
            NewCourse {
                title: "Algo101".to_string(),
                description: Some("Intro".to_string()),
                is_public: false,
            },
            actor,
        )
    }

    fn new_problem(
        actor: UserId,
        course_id: Option<CourseId>,
        answers: usize,
    ) -> (Problem, Vec<Answer>) {
        let answers = (0..answers)
            .map(|i| NewAnswer {
                title: format!("Answer {i}"),
                description: "## O(n)".to_string(),
                code: "fn main() {}".to_string(),
                is_public: true,
            })
            .collect();
        Problem::new(
            NewProblem {
                title: "Two Sum".to_string(),
                description: Some("Find a pair".to_string()),
                course_id,
                is_public: true,
                answers,
            },
            actor,
        )
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_course_patch_keeps_omitted_fields(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let other = seed_user(&pool, "bob").await;
        let repo = PgCurriculumRepository::new(pool);

        let course = new_course(admin);
        repo.insert_course(&course).await.unwrap();

        let patch = CoursePatch {
            is_public: Some(true),
            ..Default::default()
        };
        let updated = repo
            .update_course(course.id, &patch, other)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Algo101");
        assert_eq!(updated.description.as_deref(), Some("Intro"));
        assert!(updated.is_public);
        assert_eq!(updated.created_by_id, admin);
        assert_eq!(updated.updated_by_id, other);
        assert!(updated.updated_at >= course.updated_at);

        let missing = repo
            .update_course(CourseId::new(), &patch, other)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_blank_description_clears_to_null(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let repo = PgCurriculumRepository::new(pool);

        let course = new_course(admin);
        repo.insert_course(&course).await.unwrap();
        let patch = CoursePatch {
            description: Some("   ".to_string()),
            ..Default::default()
        };
        let updated = repo
            .update_course(course.id, &patch, admin)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, None);

        let (problem, answers) = new_problem(admin, None, 0);
        repo.insert_problem(&problem, &answers).await.unwrap();
        let patch = ProblemPatch {
            description: Some(String::new()),
            ..Default::default()
        };
        let updated = repo
            .update_problem(problem.id, &patch, admin)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.title, "Two Sum");
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_dangling_parent_maps_to_not_found(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let repo = PgCurriculumRepository::new(pool.clone());

        let (orphan, answers) = new_problem(admin, Some(CourseId::new()), 2);
        let err = repo.insert_problem(&orphan, &answers).await.unwrap_err();
        assert!(matches!(err, CurriculumError::CourseNotFound));
        assert_eq!(count(&pool, "problems").await, 0);
        assert_eq!(count(&pool, "answers").await, 0);

        let (problem, _) = new_problem(admin, None, 0);
        repo.insert_problem(&problem, &[]).await.unwrap();
        let patch = ProblemPatch {
            course_id: Some(CourseId::new()),
            ..Default::default()
        };
        let err = repo
            .update_problem(problem.id, &patch, admin)
            .await
            .unwrap_err();
        assert!(matches!(err, CurriculumError::CourseNotFound));

        let answer = Answer::new(
            ProblemId::new(),
            NewAnswer {
                title: "Loop".to_string(),
                description: String::new(),
                code: "x".to_string(),
                is_public: true,
            },
            admin,
        );
        let err = repo.insert_answer(&answer).await.unwrap_err();
        assert!(matches!(err, CurriculumError::ProblemNotFound));
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_insert_problem_with_answers(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let repo = PgCurriculumRepository::new(pool);

        let course = new_course(admin);
        repo.insert_course(&course).await.unwrap();
        let (problem, answers) = new_problem(admin, Some(course.id), 2);
        repo.insert_problem(&problem, &answers).await.unwrap();

        let found = repo
            .find_problem(problem.id, ReadScope::All)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.answer_count, 2);
        assert_eq!(found.course.map(|c| c.title).as_deref(), Some("Algo101"));

        // Private course, public problem: the problem is still listed
        let listed = repo.list_courses(ReadScope::PublicOnly).await.unwrap();
        assert!(listed.is_empty());
        let listed = repo.list_courses(ReadScope::All).await.unwrap();
        assert_eq!(listed[0].problem_count, 1);

        let answers = repo
            .list_answers(problem.id, ReadScope::PublicOnly)
            .await
            .unwrap();
        assert_eq!(answers.len(), 2);
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_delete_course_detaches_problems(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let repo = PgCurriculumRepository::new(pool.clone());

        let course = new_course(admin);
        repo.insert_course(&course).await.unwrap();
        let (problem, answers) = new_problem(admin, Some(course.id), 1);
        repo.insert_problem(&problem, &answers).await.unwrap();

        let deleted = repo.delete_course(course.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, course.id);
        assert!(repo.delete_course(course.id).await.unwrap().is_none());

        let found = repo
            .find_problem(problem.id, ReadScope::All)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.problem.course_id, None);
        assert!(found.course.is_none());
        assert_eq!(count(&pool, "answers").await, 1);
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_delete_problem_cascades_to_answers(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let repo = PgCurriculumRepository::new(pool.clone());

        let (problem, answers) = new_problem(admin, None, 3);
        repo.insert_problem(&problem, &answers).await.unwrap();
        assert_eq!(count(&pool, "answers").await, 3);

        let deleted = repo.delete_problem(problem.id).await.unwrap().unwrap();
        assert_eq!(deleted.title, "Two Sum");
        assert_eq!(count(&pool, "answers").await, 0);
        assert!(
            repo.find_answer(answers[0].id, ReadScope::All)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[sqlx::test(migrations = "../../../database/migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn test_answer_patch_and_visibility(pool: PgPool) {
        let admin = seed_user(&pool, "alice").await;
        let repo = PgCurriculumRepository::new(pool);

        let (mut problem, answers) = new_problem(admin, None, 1);
        problem.is_public = false;
        repo.insert_problem(&problem, &answers).await.unwrap();
        let answer_id = answers[0].id;

        let patch = AnswerPatch {
            code: Some("fn solve() {}".to_string()),
            ..Default::default()
        };
        let updated = repo
            .update_answer(answer_id, &patch, admin)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.code, "fn solve() {}");
        assert_eq!(updated.title, "Answer 0");
        assert_eq!(updated.description, "## O(n)");

        // A public answer under a private problem stays hidden from students
        assert!(
            repo.find_answer(answer_id, ReadScope::PublicOnly)
                .await
                .unwrap()
                .is_none()
        );
        let found = repo
            .find_answer(answer_id, ReadScope::All)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.problem.title, "Two Sum");

        assert!(repo.delete_answer(answer_id).await.unwrap().is_some());
        assert!(repo.delete_answer(answer_id).await.unwrap().is_none());
    }
}
