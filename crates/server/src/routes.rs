pub mod cars;
pub mod dashboard;
pub mod packages;
pub mod payments;
pub mod reports;
pub mod services;
pub mod users;

use axum::{
    http::{StatusCode, Uri},
    middleware,
    routing::get,
    Json, Router,
};
use common::types::{ApiResponse, Health};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{SessionManagerLayer, SessionStore};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::session::require_session;
use crate::state::ServerState;

pub(crate) type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
pub(crate) type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::data(data)))
}

pub(crate) fn created<T>(data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::data(data))))
}

pub(crate) fn done(message: &str) -> ApiResult<()> {
    Ok(Json(ApiResponse::message(message)))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Serialize)]
struct ApiInfo {
    success: bool,
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize)]
struct Endpoints {
    auth: &'static str,
    cars: &'static str,
    packages: &'static str,
    services: &'static str,
    payments: &'static str,
    dashboard: &'static str,
    reports: &'static str,
}

async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        success: true,
        message: "Car Wash Management System API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            auth: "/api/users",
            cars: "/api/cars",
            packages: "/api/packages",
            services: "/api/services",
            payments: "/api/payments",
            dashboard: "/api/dashboard",
            reports: "/api/reports",
        },
    })
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("API endpoint not found".into())
}

async fn route_not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "no route");
    ApiError::NotFound("Route not found".into())
}

/// Build the application router.
///
/// Everything under `/api` except registration and login requires a
/// session; `static_dir`, when given, serves the dashboard for all other
/// unmatched paths.
pub fn build_router<Store>(
    state: ServerState,
    cors: CorsLayer,
    sessions: SessionManagerLayer<Store>,
    static_dir: Option<&str>,
) -> Router
where
    Store: SessionStore + Clone,
{
    let public_api = Router::new()
        .route("/users/register", axum::routing::post(users::register))
        .route("/users/login", axum::routing::post(users::login));

    let protected_api = Router::new()
        .merge(users::router())
        .merge(cars::router())
        .merge(packages::router())
        .merge(services::router())
        .merge(payments::router())
        .merge(dashboard::router())
        .merge(reports::router())
        .route_layer(middleware::from_fn(require_session));

    let api = public_api.merge(protected_api).fallback(api_not_found);

    let app = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let app = match static_dir {
        Some(dir) => {
            let index = format!("{}/index.html", dir.trim_end_matches('/'));
            app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => app.fallback(route_not_found),
    };

    app.with_state(state)
        .layer(sessions)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
