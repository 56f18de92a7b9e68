use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use models::car;
use service::car::domain::CarInput;

use super::{created, done, ok, ApiResult, Created};
use crate::errors::ApiJson;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/cars", get(list).post(create))
        .route("/cars/search/:term", get(search))
        .route("/cars/:plate", get(get_one).put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/cars", tag = "cars", responses((status = 200, description = "All cars, newest first")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<car::Model>> {
    ok(state.cars.list().await?)
}

#[utoipa::path(
    get, path = "/api/cars/search/{term}", tag = "cars",
    params(("term" = String, Path, description = "Substring of plate number or driver name")),
    responses((status = 200, description = "Matching cars"))
)]
pub async fn search(State(state): State<ServerState>, Path(term): Path<String>) -> ApiResult<Vec<car::Model>> {
    ok(state.cars.search(&term).await?)
}

#[utoipa::path(
    get, path = "/api/cars/{plate}", tag = "cars",
    params(("plate" = String, Path, description = "Plate number")),
    responses((status = 200, description = "OK"), (status = 404, description = "Car not found"))
)]
pub async fn get_one(State(state): State<ServerState>, Path(plate): Path<String>) -> ApiResult<car::Model> {
    ok(state.cars.get(&plate).await?)
}

#[utoipa::path(
    post, path = "/api/cars", tag = "cars",
    request_body = crate::openapi::CarRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Plate number already registered")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<CarInput>) -> Created<car::Model> {
    created(state.cars.create(input).await?)
}

#[utoipa::path(
    put, path = "/api/cars/{plate}", tag = "cars",
    params(("plate" = String, Path, description = "Plate number")),
    request_body = crate::openapi::CarRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Car not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(plate): Path<String>,
    ApiJson(input): ApiJson<CarInput>,
) -> ApiResult<car::Model> {
    ok(state.cars.update(&plate, input).await?)
}

#[utoipa::path(
    delete, path = "/api/cars/{plate}", tag = "cars",
    params(("plate" = String, Path, description = "Plate number")),
    responses((status = 200, description = "Deleted with its services and payments"), (status = 404, description = "Car not found"))
)]
pub async fn remove(State(state): State<ServerState>, Path(plate): Path<String>) -> ApiResult<()> {
    state.cars.delete(&plate).await?;
    done("Car deleted successfully")
}
