use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use service::dashboard::domain::{DailyRevenue, DailyServices, DashboardStats, PackagePopularity};

use super::{ok, ApiResult};
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(stats))
        .route("/dashboard/revenue/:start/:end", get(revenue))
        .route("/dashboard/services/:start/:end", get(services))
        .route("/dashboard/packages/popularity", get(popularity))
}

#[utoipa::path(get, path = "/api/dashboard", tag = "dashboard", responses((status = 200, description = "Totals, recent activity and top packages")))]
pub async fn stats(State(state): State<ServerState>) -> ApiResult<DashboardStats> {
    ok(state.dashboard.stats().await?)
}

#[utoipa::path(
    get, path = "/api/dashboard/revenue/{start}/{end}", tag = "dashboard",
    params(("start" = String, Path, description = "First day, YYYY-MM-DD"), ("end" = String, Path, description = "Last day, inclusive")),
    responses((status = 200, description = "Revenue per day"), (status = 400, description = "Invalid date"))
)]
pub async fn revenue(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Vec<DailyRevenue>> {
    ok(state.dashboard.revenue_by_date_range(&start, &end).await?)
}

#[utoipa::path(
    get, path = "/api/dashboard/services/{start}/{end}", tag = "dashboard",
    params(("start" = String, Path, description = "First day, YYYY-MM-DD"), ("end" = String, Path, description = "Last day, inclusive")),
    responses((status = 200, description = "Services per day"), (status = 400, description = "Invalid date"))
)]
pub async fn services(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Vec<DailyServices>> {
    ok(state.dashboard.service_stats_by_date_range(&start, &end).await?)
}

#[utoipa::path(get, path = "/api/dashboard/packages/popularity", tag = "dashboard", responses((status = 200, description = "Every package with service count and revenue")))]
pub async fn popularity(State(state): State<ServerState>) -> ApiResult<Vec<PackagePopularity>> {
    ok(state.dashboard.package_popularity().await?)
}
