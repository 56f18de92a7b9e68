use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use service::dashboard::domain::DailyReportRow;

use super::{ok, ApiResult};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/reports/:date", get(daily))
}

/// Services of one day with their payment, if any.
#[utoipa::path(
    get, path = "/api/reports/{date}", tag = "reports",
    params(("date" = String, Path, description = "Day, YYYY-MM-DD")),
    responses((status = 200, description = "Daily report"), (status = 400, description = "Invalid date format"))
)]
pub async fn daily(State(state): State<ServerState>, Path(date): Path<String>) -> ApiResult<Vec<DailyReportRow>> {
    ok(state.dashboard.daily_report(&date).await?)
}
