use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use models::payment::Detail;
use service::payment::domain::{PaymentInput, RevenueTotal};

use super::{created, done, ok, ApiResult, Created};
use crate::errors::ApiJson;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/payments", get(list).post(create))
        .route("/payments/service/:record", get(by_record))
        .route("/payments/date-range/:start/:end", get(by_date_range))
        .route("/payments/revenue/:start/:end", get(revenue))
        .route("/payments/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/payments", tag = "payments", responses((status = 200, description = "All payments with their service")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Detail>> {
    ok(state.payments.list().await?)
}

#[utoipa::path(
    get, path = "/api/payments/service/{record}", tag = "payments",
    params(("record" = String, Path, description = "Record number")),
    responses((status = 200, description = "Payments of one service record"))
)]
pub async fn by_record(State(state): State<ServerState>, Path(record): Path<String>) -> ApiResult<Vec<Detail>> {
    ok(state.payments.by_record(&record).await?)
}

#[utoipa::path(
    get, path = "/api/payments/date-range/{start}/{end}", tag = "payments",
    params(("start" = String, Path, description = "First day, YYYY-MM-DD"), ("end" = String, Path, description = "Last day, inclusive")),
    responses((status = 200, description = "Payments in range, latest first"), (status = 400, description = "Invalid date"))
)]
pub async fn by_date_range(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Vec<Detail>> {
    ok(state.payments.by_date_range(&start, &end).await?)
}

#[utoipa::path(
    get, path = "/api/payments/revenue/{start}/{end}", tag = "payments",
    params(("start" = String, Path, description = "First day, YYYY-MM-DD"), ("end" = String, Path, description = "Last day, inclusive")),
    responses((status = 200, description = "Total revenue in range"), (status = 400, description = "Invalid date"))
)]
pub async fn revenue(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<RevenueTotal> {
    ok(state.payments.revenue_between(&start, &end).await?)
}

#[utoipa::path(
    get, path = "/api/payments/{id}", tag = "payments",
    params(("id" = String, Path, description = "Payment number, PY-YYYYMMDDHHmmssSSS")),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid Payment ID format"), (status = 404, description = "Payment not found"))
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<Detail> {
    ok(state.payments.get(&id).await?)
}

#[utoipa::path(
    post, path = "/api/payments", tag = "payments",
    request_body = crate::openapi::PaymentRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error or missing service record"))
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<PaymentInput>) -> Created<Detail> {
    created(state.payments.create(input).await?)
}

#[utoipa::path(
    put, path = "/api/payments/{id}", tag = "payments",
    params(("id" = String, Path, description = "Payment number")),
    request_body = crate::openapi::PaymentRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Payment not found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<PaymentInput>,
) -> ApiResult<Detail> {
    ok(state.payments.update(&id, input).await?)
}

#[utoipa::path(
    delete, path = "/api/payments/{id}", tag = "payments",
    params(("id" = String, Path, description = "Payment number")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Payment not found"))
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<()> {
    state.payments.delete(&id).await?;
    done("Payment deleted successfully")
}
