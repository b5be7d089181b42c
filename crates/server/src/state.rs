use crate::{config::Config, storage::FileStorage};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handles cloned into every request handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Upload backend, absent when no storage credentials are configured
    pub storage: Option<Arc<dyn FileStorage>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        storage: Option<Arc<dyn FileStorage>>,
        config: Config,
    ) -> Self {
        Self {
            db,
            storage,
            config: Arc::new(config),
        }
    }
}
