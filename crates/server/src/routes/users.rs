use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use common::types::ApiResponse;
use service::auth::domain::{AuthUser, ChangePasswordInput, CreateUserInput, LoginInput, RegisterInput, UpdateUserInput};
use tower_sessions::Session;
use tracing::info;

use super::{created, done, ok, ApiResult, Created};
use crate::errors::{ApiError, ApiJson};
use crate::session;
use crate::state::ServerState;

/// Session-protected user routes; register and login are mounted publicly.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users/logout", post(logout))
        .route("/users/me", get(me))
        .route("/users/change-password", post(change_password))
        .route("/users", get(list).post(create))
        .route("/users/:id", get(get_one).put(update).delete(remove))
}

fn user_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::BadRequest("Invalid user ID".into()))
}

#[utoipa::path(
    post, path = "/api/users/register", tag = "users",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered and signed in"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    session: Session,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Created<AuthUser> {
    let user = state.auth.register(input).await?;
    session::establish(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data_with_message("Registration successful", user))))
}

#[utoipa::path(
    post, path = "/api/users/login", tag = "users",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Signed in"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    session: Session,
    ApiJson(input): ApiJson<LoginInput>,
) -> ApiResult<AuthUser> {
    let user = state.auth.login(input).await?;
    session::establish(&session, &user).await?;
    Ok(Json(ApiResponse::data_with_message("Login successful", user)))
}

#[utoipa::path(post, path = "/api/users/logout", tag = "users", responses((status = 200, description = "Signed out"), (status = 401, description = "No session")))]
pub async fn logout(session: Session, Extension(user): Extension<AuthUser>) -> ApiResult<()> {
    session::destroy(&session).await?;
    info!(user_id = user.id, "user_logged_out");
    done("Logout successful")
}

#[utoipa::path(get, path = "/api/users/me", tag = "users", responses((status = 200, description = "Current user"), (status = 404, description = "User not found")))]
pub async fn me(State(state): State<ServerState>, Extension(user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    ok(state.auth.current_user(&user).await?)
}

#[utoipa::path(
    post, path = "/api/users/change-password", tag = "users",
    request_body = crate::openapi::ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Current password is incorrect")
    )
)]
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<ChangePasswordInput>,
) -> ApiResult<()> {
    state.auth.change_password(&user, input).await?;
    done("Password changed successfully")
}

#[utoipa::path(get, path = "/api/users", tag = "users", responses((status = 200, description = "All users, newest first")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<AuthUser>> {
    ok(state.auth.list_users().await?)
}

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = crate::openapi::UserRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Username taken"))
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<CreateUserInput>) -> Created<AuthUser> {
    created(state.auth.create_user(input).await?)
}

#[utoipa::path(
    get, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "User not found"))
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<AuthUser> {
    ok(state.auth.get_user(user_id(&id)?).await?)
}

#[utoipa::path(
    put, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = crate::openapi::UserRequest,
    responses((status = 200, description = "Updated"), (status = 404, description = "User not found"), (status = 409, description = "Username taken"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateUserInput>,
) -> ApiResult<AuthUser> {
    let user = state.auth.update_user(user_id(&id)?, input).await?;
    Ok(Json(ApiResponse::data_with_message("User updated successfully", user)))
}

#[utoipa::path(
    delete, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "Deleted"), (status = 400, description = "Cannot delete your own account"), (status = 404, description = "User not found"))
)]
pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.auth.delete_user(&user, user_id(&id)?).await?;
    done("User deleted successfully")
}
