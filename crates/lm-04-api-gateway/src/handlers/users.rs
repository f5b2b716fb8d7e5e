//! `/users` handlers.

use axum::{extract::State, http::StatusCode, Json};
use library_telemetry::{LOGINS, USERS_REGISTERED};
use lm_01_identity::{LoginResult, Registration};
use serde::{Deserialize, Serialize};
use shared_types::{UserId, UserProfile};

use crate::adapters::{ApiJson, ApiPath, CurrentCaller};
use crate::domain::ApiResult;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

/// `POST /users/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(registration): ApiJson<Registration>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state.identity.register(registration).await?;
    USERS_REGISTERED.inc();
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// `POST /users/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResult>> {
    match state.identity.login(&request.email, &request.password).await {
        Ok(result) => {
            LOGINS.with_label_values(&["ok"]).inc();
            Ok(Json(result))
        }
        Err(err) => {
            LOGINS.with_label_values(&[err.kind().as_str()]).inc();
            Err(err.into())
        }
    }
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.identity.list_users(&caller).await?))
}

/// `GET /users/getuser`
pub async fn get_self(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.identity.get_self(&caller).await?))
}

/// `GET /users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    ApiPath(user_id): ApiPath<UserId>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.identity.get_user(&caller, user_id).await?))
}
