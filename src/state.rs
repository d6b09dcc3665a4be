//! Shared application state.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::ContentCache;
use crate::config::AppConfig;
use crate::session::{LoginLimiter, SessionGate};
use crate::storage::{LocalMediaStorage, MediaStorage};
use crate::store::{
    MemoryPortfolioStore, MemoryReviewStore, MemorySettingsStore, PgPortfolioStore, PgReviewStore,
    PgSettingsStore, PortfolioStore, ReviewStore, SettingsStore,
};

/// Everything a handler needs, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub portfolio: Arc<dyn PortfolioStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub media: Arc<dyn MediaStorage>,
    pub sessions: Arc<SessionGate>,
    pub login_limiter: Arc<LoginLimiter>,
    pub cache: Arc<ContentCache>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        portfolio: Arc<dyn PortfolioStore>,
        reviews: Arc<dyn ReviewStore>,
        settings: Arc<dyn SettingsStore>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        let sessions = SessionGate::new(&config.jwt_secret, config.session_ttl_minutes);
        let login_limiter = LoginLimiter::new(config.login_max_attempts, config.login_window_secs);
        let cache = ContentCache::new(Duration::from_secs(config.content_cache_ttl_secs));
        Self {
            config: Arc::new(config),
            portfolio,
            reviews,
            settings,
            media,
            sessions: Arc::new(sessions),
            login_limiter: Arc::new(login_limiter),
            cache: Arc::new(cache),
        }
    }

    fn local_storage(config: &AppConfig) -> Arc<dyn MediaStorage> {
        Arc::new(LocalMediaStorage::new(
            config.storage_root.clone(),
            config.storage_public_url.clone(),
        ))
    }

    /// No database: content lives in memory until the process exits.
    pub fn in_memory(config: AppConfig) -> Self {
        let media = Self::local_storage(&config);
        Self::new(
            config,
            Arc::new(MemoryPortfolioStore::new()),
            Arc::new(MemoryReviewStore::new()),
            Arc::new(MemorySettingsStore::new()),
            media,
        )
    }

    pub fn with_pool(config: AppConfig, pool: PgPool) -> Self {
        let media = Self::local_storage(&config);
        Self::new(
            config,
            Arc::new(PgPortfolioStore::new(pool.clone())),
            Arc::new(PgReviewStore::new(pool.clone())),
            Arc::new(PgSettingsStore::new(pool)),
            media,
        )
    }
}
