use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use common::env::ensure_env;
use configs::{AppConfig, SessionConfig, SessionStoreKind};
use migration::MigratorTrait;
use models::db::connect_with_config;
use tower_http::cors::CorsLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::{PostgresStore, SqliteStore};
use tracing::info;

use crate::routes;
use crate::state::ServerState;

/// Allow credentials from the configured dashboard origin; without one,
/// mirror whatever origin asks.
pub fn build_cors(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::very_permissive());
    };
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}

pub fn session_layer<Store: SessionStore + Clone>(store: Store, cfg: &SessionConfig) -> SessionManagerLayer<Store> {
    SessionManagerLayer::new(store)
        .with_name(cfg.cookie_name.clone())
        .with_secure(cfg.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(cfg.ttl_hours)))
}

/// Connect, migrate, seed the administrator and wire the services.
pub async fn prepare(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState::new(db, cfg);

    let admin = &cfg.auth.seed_admin;
    if admin.enabled && state.auth.ensure_user(&admin.username, &admin.password).await? {
        info!(username = %admin.username, "seeded default administrator");
    }
    Ok(state)
}

/// Build the app from a loaded config and serve it until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = prepare(&cfg).await?;
    let cors = build_cors(cfg.server.cors_origin.as_deref())?;
    let static_dir = match cfg.server.static_dir.as_deref() {
        Some(dir) if ensure_env(Some(dir)).await => Some(dir),
        _ => None,
    };

    let app: Router = match cfg.session.store {
        SessionStoreKind::Memory => {
            routes::build_router(state, cors, session_layer(MemoryStore::default(), &cfg.session), static_dir)
        }
        SessionStoreKind::Database if cfg.database.is_sqlite() => {
            let store = SqliteStore::new(state.db.get_sqlite_connection_pool().clone());
            store.migrate().await?;
            routes::build_router(state, cors, session_layer(store, &cfg.session), static_dir)
        }
        SessionStoreKind::Database => {
            let store = PostgresStore::new(state.db.get_postgres_connection_pool().clone());
            store.migrate().await?;
            routes::build_router(state, cors, session_layer(store, &cfg.session), static_dir)
        }
    };

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, session_store = ?cfg.session.store, "starting car wash api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
