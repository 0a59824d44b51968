use std::sync::Arc;

use vetrecords_core::assets::AssetResolver;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vetrecords_db::DbPool,
    /// Server configuration (JWT settings, report options).
    pub config: Arc<ServerConfig>,
    /// Maps static/media URIs in rendered documents to files on disk.
    pub assets: Arc<AssetResolver>,
}

impl AppState {
    pub fn new(pool: vetrecords_db::DbPool, config: ServerConfig) -> Self {
        let assets = Arc::new(config.assets.resolver());
        Self {
            pool,
            config: Arc::new(config),
            assets,
        }
    }
}
