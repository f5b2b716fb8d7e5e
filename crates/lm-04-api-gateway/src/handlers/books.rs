//! `/books` handlers.

use axum::{extract::State, http::StatusCode, Json};
use library_telemetry::BOOKS_CREATED;
use lm_02_catalog::{BookUpdate, NewBook};
use shared_types::{Book, BookId};

use crate::adapters::{ApiJson, ApiPath, CurrentCaller};
use crate::domain::ApiResult;
use crate::state::AppState;

/// `POST /books`
pub async fn create_book(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiJson(request): ApiJson<NewBook>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let book = state.catalog.create_book(&caller, request).await?;
    BOOKS_CREATED.inc();
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /books/:id`
///
/// Quantities in the body are added to the stored counters.
pub async fn update_book(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(book_id): ApiPath<BookId>,
    ApiJson(request): ApiJson<BookUpdate>,
) -> ApiResult<Json<Book>> {
    Ok(Json(
        state.catalog.update_book(&caller, book_id, request).await?,
    ))
}

/// `GET /books`
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.catalog.list_books().await?))
}

/// `GET /books/:id`
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(book_id): ApiPath<BookId>,
) -> ApiResult<Json<Book>> {
    Ok(Json(state.catalog.get_book(book_id).await?))
}
