//! # Test Harness
//!
//! Builds the full node (container plus gateway router) in process and
//! drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use library_node::{LibraryContainer, NodeConfig, Snapshot};
use lm_04_api_gateway::ApiGatewayService;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Password that passes every registration check.
pub const PASSWORD: &str = "Secret#123";

/// Email of the admin [`TestApp::admin_token`] creates.
pub const ADMIN_EMAIL: &str = "admin@library.test";

/// Config with a cheap bcrypt cost.
pub fn test_config() -> NodeConfig {
    let mut config = NodeConfig::default();
    config.identity.bcrypt_cost = 4;
    config
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, or `Value::Null` for empty and non-JSON bodies.
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    /// `error.kind` of the envelope.
    pub fn error_kind(&self) -> &str {
        self.body["error"]["kind"].as_str().unwrap_or_default()
    }

    /// `error.message` of the envelope.
    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub container: Arc<LibraryContainer>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: NodeConfig) -> Self {
        Self::restore(config, Snapshot::default())
    }

    pub fn restore(config: NodeConfig, snapshot: Snapshot) -> Self {
        let container =
            Arc::new(LibraryContainer::restore(config, snapshot).expect("container builds"));
        let gateway =
            ApiGatewayService::new(container.config.gateway.clone(), container.app_state())
                .expect("gateway builds");
        Self {
            router: gateway.router(),
            container,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                let text = value.to_string();
                builder = builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, text.len());
                Body::from(text)
            }
            None => Body::empty(),
        };
        self.send_raw(builder.body(body).expect("valid request"))
            .await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn register(&self, email: &str, password: &str, is_admin: bool) -> TestResponse {
        let username = email.split('@').next().unwrap_or(email);
        self.post(
            "/users/register",
            None,
            json!({
                "username": username,
                "name": username,
                "email": email,
                "password": password,
                "contactno": "555-0100",
                "isAdmin": is_admin,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/users/login",
            None,
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Register (if needed) and log in; returns the token.
    pub async fn token_for(&self, email: &str, is_admin: bool) -> String {
        let registered = self.register(email, PASSWORD, is_admin).await;
        assert!(
            registered.status == StatusCode::CREATED || registered.status == StatusCode::CONFLICT,
            "register {email}: {} {}",
            registered.status,
            registered.text
        );
        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "login {email}: {}", login.text);
        login.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for(ADMIN_EMAIL, true).await
    }

    pub async fn create_book(&self, token: &str, name: &str, total: u32) -> TestResponse {
        self.post(
            "/books",
            Some(token),
            json!({ "name": name, "author": "Frank Herbert", "totalquantity": total }),
        )
        .await
    }

    pub async fn borrow(&self, token: &str, email: &str, book: &str) -> TestResponse {
        self.post(
            "/library/borrow",
            Some(token),
            json!({ "email": email, "name": book }),
        )
        .await
    }

    pub async fn return_book(&self, token: &str, email: &str, book: &str) -> TestResponse {
        self.post(
            "/library/return",
            Some(token),
            json!({ "email": email, "name": book }),
        )
        .await
    }

    /// Current record for `name`, read through the API.
    pub async fn book(&self, token: &str, name: &str) -> Value {
        let books = self.get("/books", Some(token)).await;
        books
            .body
            .as_array()
            .and_then(|all| all.iter().find(|b| b["name"] == name).cloned())
            .unwrap_or(Value::Null)
    }
}
