//! # Access Gate and Role Checks
//!
//! Every protected route answers `403` with the error envelope when the
//! bearer token is missing, malformed or not ours.

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::json;

    use crate::harness::{test_config, TestApp, ADMIN_EMAIL};

    const PROTECTED: &[(&str, &str)] = &[
        ("GET", "/users"),
        ("GET", "/users/getuser"),
        ("GET", "/books"),
        ("POST", "/books"),
        ("GET", "/library"),
        ("POST", "/library/borrow"),
        ("POST", "/library/return"),
    ];

    #[tokio::test]
    async fn test_missing_token_is_forbidden() {
        let app = TestApp::new();

        for (method, uri) in PROTECTED {
            let method: Method = method.parse().expect("method");
            let body = (method == Method::POST).then(|| json!({}));
            let response = app.send(method.clone(), uri, None, body).await;
            assert_eq!(response.status, StatusCode::FORBIDDEN, "{method} {uri}");
            assert_eq!(response.error_kind(), "forbidden", "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_malformed_authorization_headers() {
        let app = TestApp::new();
        let token = app.admin_token().await;

        for value in [
            format!("Basic {token}"),
            token.clone(),
            "Bearer ".to_string(),
            "Bearer not.a.jwt".to_string(),
        ] {
            let request = Request::builder()
                .uri("/books")
                .header(header::AUTHORIZATION, value.clone())
                .body(Body::empty())
                .expect("request");
            let response = app.send_raw(request).await;
            assert_eq!(response.status, StatusCode::FORBIDDEN, "{value}");
        }

        let response = app.get("/books", Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_from_another_secret_is_rejected() {
        let ours = TestApp::new();
        let mut other_config = test_config();
        other_config.identity.jwt_secret = "a-completely-different-secret".into();
        let theirs = TestApp::with_config(other_config);

        let foreign = theirs.admin_token().await;
        let response = ours.get("/books", Some(&foreign)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_member_role_limits() {
        let app = TestApp::new();
        let member = app.token_for("reader@library.test", false).await;

        let create = app.create_book(&member, "Dune", 1).await;
        assert_eq!(create.status, StatusCode::FORBIDDEN);
        assert_eq!(create.error_message(), "admin role required");

        let users = app.get("/users", Some(&member)).await;
        assert_eq!(users.status, StatusCode::FORBIDDEN);

        // Reading the catalog only needs a token.
        let books = app.get("/books", Some(&member)).await;
        assert_eq!(books.status, StatusCode::OK);
        assert_eq!(books.body, json!([]));
    }

    #[tokio::test]
    async fn test_admin_lists_users() {
        let app = TestApp::new();
        let admin = app.admin_token().await;
        app.token_for("reader@library.test", false).await;

        let response = app.get("/users", Some(&admin)).await;
        assert_eq!(response.status, StatusCode::OK);
        let users = response.body.as_array().expect("array");
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    }

    #[tokio::test]
    async fn test_get_self() {
        let app = TestApp::new();
        let member = app.token_for("reader@library.test", false).await;

        let response = app.get("/users/getuser", Some(&member)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["email"], "reader@library.test");
        assert_eq!(response.body["role"], "member");
    }

    #[tokio::test]
    async fn test_get_user_is_admin_or_self() {
        let app = TestApp::new();
        let admin = app.admin_token().await;
        let member = app.token_for("reader@library.test", false).await;

        let users = app.container.snapshot().users;
        let id_of = |email: &str| {
            users
                .iter()
                .find(|u| u.email == email)
                .map(|u| u.id.to_string())
                .expect("user")
        };
        let member_id = id_of("reader@library.test");
        let admin_id = id_of(ADMIN_EMAIL);

        let own = app.get(&format!("/users/{member_id}"), Some(&member)).await;
        assert_eq!(own.status, StatusCode::OK);

        let other = app.get(&format!("/users/{admin_id}"), Some(&member)).await;
        assert_eq!(other.status, StatusCode::FORBIDDEN);

        let as_admin = app.get(&format!("/users/{member_id}"), Some(&admin)).await;
        assert_eq!(as_admin.status, StatusCode::OK);
        assert_eq!(as_admin.body["email"], "reader@library.test");

        let missing = app
            .get("/users/00000000-0000-4000-8000-000000000000", Some(&admin))
            .await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.error_message(), "User not found");

        let malformed = app.get("/users/42", Some(&admin)).await;
        assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
        assert_eq!(malformed.error_kind(), "validation");
    }

    #[tokio::test]
    async fn test_admin_signup_can_be_disabled() {
        let mut config = test_config();
        config.identity.allow_admin_signup = false;
        let app = TestApp::with_config(config);

        let token = app.admin_token().await;
        let create = app.create_book(&token, "Dune", 1).await;
        assert_eq!(create.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_public_routes() {
        let app = TestApp::new();

        let welcome = app.get("/", None).await;
        assert_eq!(welcome.status, StatusCode::OK);
        assert_eq!(welcome.text, "welcome!");

        let health = app.get("/health", None).await;
        assert_eq!(health.status, StatusCode::OK);
        assert_eq!(health.body["status"], "ok");

        let metrics = app.get("/metrics", None).await;
        assert_eq!(metrics.status, StatusCode::OK);
        assert!(metrics.text.contains("library_http_requests_total"));
        assert!(metrics.headers[header::CONTENT_TYPE]
            .to_str()
            .expect("ascii")
            .starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let app = TestApp::new();
        let response = app.get("/shelves", None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error_kind(), "not_found");
    }
}
