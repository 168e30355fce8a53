//! Unit tests for auth crate

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;
    use platform::crypto::to_base64url;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();

        assert_eq!(config.session_cookie_name, "auth_session");
        assert_eq!(config.session_secret, [0u8; 32]);
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_ne!(config1.session_secret, config2.session_secret);
        assert!(config1.session_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_from_base64url_secret() {
        let encoded = to_base64url(&[9u8; 32]);
        let config = AuthConfig::from_base64url_secret(&encoded).unwrap();
        assert_eq!(config.session_secret, [9u8; 32]);

        let short = to_base64url(&[9u8; 16]);
        assert!(AuthConfig::from_base64url_secret(&short).is_err());
        assert!(AuthConfig::from_base64url_secret("not base64!").is_err());
    }

    #[test]
    fn test_with_cookie_name() {
        let config = AuthConfig::development().with_cookie_name("sid");
        assert_eq!(config.session_cookie_name, "sid");
    }
}

#[cfg(test)]
mod token_tests {
    use crate::application::session_token::*;
    use crate::error::AuthError;
    use uuid::Uuid;

    const SECRET: [u8; 32] = [3u8; 32];

    #[test]
    fn test_issue_then_parse() {
        let id = Uuid::new_v4();
        let token = issue_session_token(&SECRET, id);
        assert!(token.starts_with(&id.to_string()));
        assert_eq!(parse_session_token(&SECRET, &token).unwrap(), id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_session_token(&SECRET, Uuid::new_v4());
        assert!(matches!(
            parse_session_token(&[4u8; 32], &token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let id = Uuid::new_v4();
        let token = issue_session_token(&SECRET, id);

        for bad in [
            "".to_string(),
            id.to_string(),
            format!("{}.", id),
            format!("{}.{}", token, "extra"),
            token.replacen(&id.to_string()[..8], "00000000", 1),
        ] {
            assert!(parse_session_token(&SECRET, &bad).is_err(), "{bad}");
        }
    }
}

#[cfg(test)]
mod session_tests {
    use std::sync::Arc;

    use chrono::Duration;
    use kernel::id::UserId;

    use crate::application::{CheckSessionUseCase, config::AuthConfig, issue_session_token};
    use crate::domain::entity::auth_session::AuthSession;
    use crate::domain::repository::AuthSessionRepository;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthSessionRepository;

    #[tokio::test]
    async fn test_check_session_returns_identity() {
        let repo = InMemoryAuthSessionRepository::new();
        let config = AuthConfig::with_random_secret();
        let user_id = UserId::new();
        let token = repo.sign_in(&config, user_id, UserRole::Admin).await;

        let use_case = CheckSessionUseCase::new(Arc::new(repo), Arc::new(config));
        let session = use_case.execute(&token).await.unwrap();

        assert_eq!(session.user_id, user_id);
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_expired_session_rejected_without_removal() {
        let repo = InMemoryAuthSessionRepository::new();
        let config = AuthConfig::with_random_secret();
        let session = AuthSession::new(UserId::new(), UserRole::Admin, Duration::seconds(-1));
        let token = issue_session_token(&config.session_secret, session.session_id);
        repo.insert(session).await;

        let use_case = CheckSessionUseCase::new(Arc::new(repo.clone()), Arc::new(config));
        assert!(matches!(
            use_case.execute(&token).await,
            Err(AuthError::SessionInvalid)
        ));
        assert_eq!(repo.len().await, 1);

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_session_rejected() {
        let repo = InMemoryAuthSessionRepository::new();
        let config = AuthConfig::with_random_secret();
        let token = issue_session_token(&config.session_secret, uuid::Uuid::new_v4());

        let use_case = CheckSessionUseCase::new(Arc::new(repo), Arc::new(config));
        assert!(matches!(
            use_case.execute(&token).await,
            Err(AuthError::SessionInvalid)
        ));
    }
}

#[cfg(test)]
mod gate_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use axum::{Json, Router};
    use kernel::error::body::ErrorBody;
    use kernel::id::UserId;
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::{MSG_ADMIN_REQUIRED, MSG_LOGIN_REQUIRED};
    use crate::infra::memory::InMemoryAuthSessionRepository;
    use crate::presentation::{AdminSession, CurrentSession, SessionGate};

    async fn who(CurrentSession(session): CurrentSession) -> Json<String> {
        Json(session.role.to_string())
    }

    async fn admin_only(AdminSession(session): AdminSession) -> Json<String> {
        Json(session.user_id.to_string())
    }

    async fn setup() -> (Router, String, String) {
        let repo = InMemoryAuthSessionRepository::new();
        let config = AuthConfig::with_random_secret();
        let admin = repo.sign_in(&config, UserId::new(), UserRole::Admin).await;
        let student = repo.sign_in(&config, UserId::new(), UserRole::Student).await;

        let gate = SessionGate::new(repo, config);
        let router = Router::new()
            .route("/who", get(who))
            .route("/admin", get(admin_only))
            .with_state(gate);
        (router, admin, student)
    }

    fn request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("auth_session={token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn error_of(res: axum::response::Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_cookie_is_403() {
        let (router, _, _) = setup().await;
        let res = router
            .clone()
            .oneshot(request("/who", None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_of(res).await.error, MSG_LOGIN_REQUIRED);

        let res = router.oneshot(request("/admin", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_of(res).await.error, MSG_LOGIN_REQUIRED);
    }

    #[tokio::test]
    async fn test_tampered_token_is_403() {
        let (router, admin, _) = setup().await;
        let tampered = format!("{}x", admin);
        let res = router
            .oneshot(request("/admin", Some(&tampered)))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_of(res).await.error, MSG_LOGIN_REQUIRED);
    }

    #[tokio::test]
    async fn test_student_on_admin_route_is_403() {
        let (router, _, student) = setup().await;
        let res = router
            .clone()
            .oneshot(request("/admin", Some(&student)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_of(res).await.error, MSG_ADMIN_REQUIRED);

        let res = router
            .oneshot(request("/who", Some(&student)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let (router, admin, _) = setup().await;
        let res = router
            .oneshot(request("/admin", Some(&admin)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::Unauthenticated, StatusCode::FORBIDDEN),
            (AuthError::SessionInvalid, StatusCode::FORBIDDEN),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_database_error_hides_raw_text() {
        let app = AuthError::Database(sqlx::Error::RowNotFound).into_app_error();
        assert_eq!(app.message(), MSG_AUTH_FAILED);
        assert_eq!(app.details(), Some("Record not found"));

        let source = std::error::Error::source(&app).unwrap();
        assert!(source.to_string().contains("Record not found"));
    }

    #[test]
    fn test_internal_error_keeps_source() {
        let app = AuthError::Internal("clock went backwards".to_string()).into_app_error();
        assert_eq!(app.message(), MSG_AUTH_FAILED);
        assert!(app.details().is_none());

        let source = std::error::Error::source(&app).unwrap();
        assert!(source.to_string().contains("clock went backwards"));
    }
}
