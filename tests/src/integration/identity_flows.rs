//! # Registration and Login Flows

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::harness::{TestApp, PASSWORD};

    #[tokio::test]
    async fn test_password_policy_cases() {
        let app = TestApp::new();

        let short = app.register("a@library.test", "short1", false).await;
        assert_eq!(short.status, StatusCode::BAD_REQUEST);
        assert_eq!(short.error_kind(), "validation");
        assert_eq!(short.error_message(), "Minimum 8 characters");

        let no_symbol = app.register("a@library.test", "password1", false).await;
        assert_eq!(no_symbol.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            no_symbol.error_message(),
            "Minimum one special character required"
        );

        let valid = app.register("a@library.test", "password1!", false).await;
        assert_eq!(valid.status, StatusCode::CREATED, "{}", valid.text);
    }

    #[tokio::test]
    async fn test_registration_checks_run_in_order() {
        let app = TestApp::new();

        let cases = [
            ("", PASSWORD, "EmailId is empty"),
            ("not-an-email", PASSWORD, "Invalid email address"),
            ("b@library.test", "", "Password is empty"),
            ("b@library.test", "password!", "Minimum one number required"),
        ];
        for (email, password, message) in cases {
            let response = app.register(email, password, false).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{email}/{password}");
            assert_eq!(response.error_message(), message, "{email}/{password}");
        }
        assert!(app.container.snapshot().users.is_empty());
    }

    #[tokio::test]
    async fn test_register_response_hides_hash() {
        let app = TestApp::new();

        let response = app.register("reader@library.test", PASSWORD, false).await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["message"], "User created successfully");
        assert_eq!(response.body["user"]["email"], "reader@library.test");
        assert_eq!(response.body["user"]["contact"], "555-0100");
        assert_eq!(response.body["user"]["role"], "member");
        assert!(response.body["user"].get("password_hash").is_none());
        assert!(!response.text.contains("$2"));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let app = TestApp::new();
        app.register("reader@library.test", PASSWORD, false).await;

        let again = app.register("reader@library.test", PASSWORD, false).await;
        assert_eq!(again.status, StatusCode::CONFLICT);
        assert_eq!(again.error_kind(), "conflict");
        assert_eq!(again.error_message(), "User already exists");
    }

    #[tokio::test]
    async fn test_login_returns_user_and_token() {
        let app = TestApp::new();
        app.register("reader@library.test", PASSWORD, false).await;

        let login = app.login("reader@library.test", PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body["user"]["email"], "reader@library.test");
        assert!(login.body["user"].get("password_hash").is_none());
        let token = login.body["token"].as_str().expect("token");
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let app = TestApp::new();
        app.register("reader@library.test", PASSWORD, false).await;

        for (email, password) in [
            ("reader@library.test", "Wrong#999"),
            ("nobody@library.test", PASSWORD),
        ] {
            let response = app.login(email, password).await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
            assert_eq!(response.error_kind(), "unauthorized");
            assert_eq!(response.error_message(), "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_login_with_empty_body() {
        let app = TestApp::new();
        let response = app.post("/users/login", None, json!({})).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_flag_honoured_when_allowed() {
        let app = TestApp::new();
        let response = app.register("boss@library.test", PASSWORD, true).await;
        assert_eq!(response.body["user"]["role"], "admin");
    }
}
