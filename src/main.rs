mod models;
mod handlers;
mod services;
mod middleware;
mod catalog;
mod entry;
mod dashboard;
mod config;
mod errors;

use axum::{
    routing::{get, post},
    Router,
    middleware::from_fn_with_state,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore as SessionMemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use std::sync::Arc;
use anyhow::Context;
use crate::{
    catalog::TaskCatalog,
    config::{Config, StoreBackend},
    dashboard::Dashboard,
    errors::response::method_not_allowed,
    services::{InsightsService, MemoryStore, RedisStore, Store},
};

// Application state that can be shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub insights: Arc<InsightsService>,
    pub catalog: Arc<TaskCatalog>,
}

fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            let client = redis::Client::open(config.store.redis_url.as_str())
                .context("Failed to open Redis client")?;
            Ok(Arc::new(RedisStore::new(Arc::new(client))))
        }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    // Session store setup
    let session_store = SessionMemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    Router::new()
        // Auth routes
        .route("/api/login", post(handlers::handle_login).fallback(method_not_allowed))
        .route("/api/logout", post(handlers::handle_logout))
        .route("/api/session", get(handlers::current_session))

        // Data routes
        .route("/api/data", get(handlers::get_data))
        .route(
            "/api/users",
            post(handlers::create_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/records",
            post(handlers::create_record)
                .put(handlers::update_record)
                .delete(handlers::delete_record)
                .fallback(method_not_allowed),
        )
        .route("/api/records/preview", post(handlers::preview_record))
        .route("/api/insights", post(handlers::ask_insights))

        // Reference data
        .route("/api/health", get(handlers::health))
        .route("/api/catalog", get(handlers::catalog))
        .route("/api/time-study", get(handlers::time_study))

        // Frontend bundle
        .fallback_service(ServeDir::new(&config.server.static_dir))

        // Add middleware
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size))

        // Add state
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    let store = open_store(&config)?;
    let catalog = Arc::new(TaskCatalog::with_extra(&config.catalog.tasks));
    tracing::info!("Loaded {} tasks into the catalog", catalog.tasks().len());

    let dashboard = Arc::new(Dashboard::new(store, catalog.clone(), config.admin.clone()));
    dashboard
        .ensure_default_admin()
        .await
        .context("Failed to seed the default admin")?;

    let state = AppState {
        dashboard,
        insights: Arc::new(InsightsService::from_config(&config.insights)),
        catalog,
    };
    let app = build_router(state, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Failed to start server")?;
    Ok(())
}
