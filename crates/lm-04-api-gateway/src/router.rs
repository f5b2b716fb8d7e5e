//! Route table and middleware assembly.
//!
//! | Route                  | Method | Gate      |
//! |------------------------|--------|-----------|
//! | `/`                    | GET    | public    |
//! | `/health`, `/metrics`  | GET    | public    |
//! | `/users/register`      | POST   | public    |
//! | `/users/login`         | POST   | public    |
//! | `/users`               | GET    | admin     |
//! | `/users/getuser`       | GET    | token     |
//! | `/users/:id`           | GET    | admin/self|
//! | `/books`               | GET    | token     |
//! | `/books`               | POST   | admin     |
//! | `/books/:id`           | GET    | token     |
//! | `/books/:id`           | PUT    | admin     |
//! | `/library/borrow`      | POST   | admin     |
//! | `/library/return`      | POST   | token     |
//! | `/library`             | GET    | token     |
//! | `/library/:userid`     | GET    | token     |
//!
//! The access gate only establishes the caller; role checks stay in the
//! subsystems.

use crate::domain::GatewayConfig;
use crate::handlers::{books, library, system, users};
use crate::middleware::{
    create_cors_layer, AccessGateLayer, RateLimitLayer, TimeoutLayer, TracingLayer,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Routes reachable without a token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(system::welcome))
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
}

/// Routes behind the access gate.
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/getuser", get(users::get_self))
        .route("/users/:id", get(users::get_user))
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book).put(books::update_book))
        .route("/library", get(library::list_all_transactions))
        .route("/library/borrow", post(library::borrow))
        .route("/library/return", post(library::return_book))
        .route("/library/:userid", get(library::list_user_transactions))
        .route_layer(AccessGateLayer::new(Arc::clone(&state.identity)))
}

/// Build the complete HTTP router.
///
/// The body limit sits innermost so its responses are converted before the
/// custom layers see them.
pub fn build_router(state: AppState, config: &GatewayConfig, rate_limit: RateLimitLayer) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
        .layer(rate_limit)
        .layer(TimeoutLayer::new(&config.timeouts));

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .fallback(system::not_found)
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(middleware)
        .with_state(state)
}
