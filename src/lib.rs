pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use config::Config;
use services::{
    focus::{FocusModeStore, PgFocusModeStore},
    tags::{PgTagStore, TagStore},
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub focus_modes: Arc<dyn FocusModeStore>,
    pub tags: Arc<dyn TagStore>,
}

impl AppState {
    /// State backed by PostgreSQL stores sharing one pool.
    pub fn new(pool: PgPool, config: Arc<Config>) -> Self {
        Self {
            focus_modes: Arc::new(PgFocusModeStore::new(pool.clone())),
            tags: Arc::new(PgTagStore::new(pool.clone())),
            db: pool,
            config,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Focus modes
        .route(
            "/focus-modes",
            get(routes::focus::list_focus_modes)
                .post(routes::focus::create_focus_mode)
                .put(routes::focus::update_focus_mode)
                .patch(routes::focus::update_focus_mode),
        )
        .route("/focus-modes/{focusId}", delete(routes::focus::delete_focus_mode))
        // Tags
        .route("/tags", get(routes::tags::list_tags).post(routes::tags::create_tag))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}
