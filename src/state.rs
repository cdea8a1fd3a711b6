//! Application state for Showcase.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::error::Error;
use crate::services::{AuthService, StorageService, UploadLimiter};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Session token service.
    pub auth: AuthService,
    /// Pre-signed upload service.
    pub storage: Arc<StorageService>,
    /// Upload quota per user.
    pub upload_limiter: Arc<UploadLimiter>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Sign-in app the browser authenticates against, published to clients.
    pub google_client_id: Option<String>,
}

impl AppState {
    /// Create a new application state, initializing all services.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let database_url = config
            .database
            .url
            .as_deref()
            .ok_or_else(|| Error::Configuration("DATABASE_URL is not set".to_string()))?;

        // Initialize database
        let db = crate::db::init_pool(database_url).await?;
        crate::db::initialize_schema(&db).await?;

        let storage = Arc::new(StorageService::from_env(&config.storage).await);

        Ok(Self {
            db,
            auth: AuthService::new(&config.auth),
            storage,
            upload_limiter: Arc::new(UploadLimiter::new(&config.rate_limit)),
            cookie_secure: config.auth.cookie_secure,
            google_client_id: config.auth.google_client_id.clone(),
        })
    }
}
