//! Shared application state for all routes. Built once at startup; nothing in it is mutated per request.

use crate::config::AppConfig;
use crate::model::EntityRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub registry: Arc<EntityRegistry>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig, registry: EntityRegistry) -> Self {
        AppState {
            pool,
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }
}
