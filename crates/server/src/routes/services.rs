use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use models::service_record::Detail;
use service::service_record::domain::ServiceRecordInput;

use super::{created, done, ok, ApiResult, Created};
use crate::errors::ApiJson;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/services", get(list).post(create))
        .route("/services/car/:plate", get(by_car))
        .route("/services/date-range/:start/:end", get(by_date_range))
        .route("/services/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "All service records with car and package")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Detail>> {
    ok(state.records.list().await?)
}

#[utoipa::path(
    get, path = "/api/services/car/{plate}", tag = "services",
    params(("plate" = String, Path, description = "Plate number")),
    responses((status = 200, description = "Services of one car, newest first"))
)]
pub async fn by_car(State(state): State<ServerState>, Path(plate): Path<String>) -> ApiResult<Vec<Detail>> {
    ok(state.records.by_car(&plate).await?)
}

#[utoipa::path(
    get, path = "/api/services/date-range/{start}/{end}", tag = "services",
    params(("start" = String, Path, description = "First day, YYYY-MM-DD"), ("end" = String, Path, description = "Last day, inclusive")),
    responses((status = 200, description = "Services in range, latest first"), (status = 400, description = "Invalid date"))
)]
pub async fn by_date_range(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Vec<Detail>> {
    ok(state.records.by_date_range(&start, &end).await?)
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Record number, RC-YYYYMMDDHHmmssSSS")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid Record ID format"), (status = 404, description = "Service record not found"))
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<Detail> {
    ok(state.records.get(&id).await?)
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::ServiceRecordRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error or missing car/package"))
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<ServiceRecordInput>) -> Created<Detail> {
    created(state.records.create(input).await?)
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Record number")),
    request_body = crate::openapi::ServiceRecordRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Service record not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ServiceRecordInput>,
) -> ApiResult<Detail> {
    ok(state.records.update(&id, input).await?)
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Record number")),
    responses((status = 200, description = "Deleted with its payments"), (status = 404, description = "Service record not found"))
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<()> {
    state.records.delete(&id).await?;
    done("Service record deleted successfully")
}
