pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use storage::ResumeStore;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: ConnectionManager,
    pub storage: ResumeStore,
    pub config: config::AppConfig,
}
