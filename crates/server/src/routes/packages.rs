use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use models::package;
use service::package::domain::PackageInput;

use super::{created, done, ok, ApiResult, Created};
use crate::errors::ApiJson;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/packages", get(list).post(create))
        .route("/packages/search/:term", get(search))
        .route("/packages/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/packages", tag = "packages", responses((status = 200, description = "All packages, newest first")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<package::Model>> {
    ok(state.packages.list().await?)
}

#[utoipa::path(
    get, path = "/api/packages/search/{term}", tag = "packages",
    params(("term" = String, Path, description = "Substring of name or description")),
    responses((status = 200, description = "Matching packages"))
)]
pub async fn search(State(state): State<ServerState>, Path(term): Path<String>) -> ApiResult<Vec<package::Model>> {
    ok(state.packages.search(&term).await?)
}

#[utoipa::path(
    get, path = "/api/packages/{id}", tag = "packages",
    params(("id" = String, Path, description = "Package number, PK-YYYYMMDDHHmmssSSS")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid Package ID format"), (status = 404, description = "Package not found"))
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<package::Model> {
    ok(state.packages.get(&id).await?)
}

#[utoipa::path(
    post, path = "/api/packages", tag = "packages",
    request_body = crate::openapi::PackageRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<PackageInput>) -> Created<package::Model> {
    created(state.packages.create(input).await?)
}

#[utoipa::path(
    put, path = "/api/packages/{id}", tag = "packages",
    params(("id" = String, Path, description = "Package number")),
    request_body = crate::openapi::PackageRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Package not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<PackageInput>,
) -> ApiResult<package::Model> {
    ok(state.packages.update(&id, input).await?)
}

#[utoipa::path(
    delete, path = "/api/packages/{id}", tag = "packages",
    params(("id" = String, Path, description = "Package number")),
    responses((status = 200, description = "Deleted with its services and payments"), (status = 404, description = "Package not found"))
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<()> {
    state.packages.delete(&id).await?;
    done("Package deleted successfully")
}
