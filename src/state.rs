//! Shared application state for all routes.

use crate::admin::{default_model, AdminModel};
use crate::auth::SessionKeys;
use crate::config::Settings;
use crate::error::AppError;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub settings: Arc<Settings>,
    pub keys: Arc<SessionKeys>,
    pub admin: Arc<AdminModel>,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: Settings) -> Result<Self, AppError> {
        let keys = SessionKeys::new(&settings.secret_key);
        Ok(AppState {
            pool,
            settings: Arc::new(settings),
            keys: Arc::new(keys),
            admin: Arc::new(default_model()?),
        })
    }
}
