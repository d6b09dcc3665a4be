//! Read-through cache for the public site.
//!
//! One slot per collection. A slot's mutex is held across the load, so
//! concurrent misses wait for the first loader instead of hitting the store
//! again. Failed loads are not cached. Admin writes invalidate explicitly.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::db::models::{PortfolioItem, Review, SiteSetting};
use crate::store::{PortfolioStore, ReviewStore, SettingsStore, StoreError};

pub struct CacheSlot<T> {
    entry: Mutex<Option<(Instant, Arc<T>)>>,
    ttl: Duration,
}

impl<T> CacheSlot<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }

    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut entry = self.entry.lock().await;
        if let Some((loaded_at, value)) = entry.as_ref() {
            if loaded_at.elapsed() < self.ttl {
                return Ok(value.clone());
            }
        }

        let value = Arc::new(load().await?);
        *entry = Some((Instant::now(), value.clone()));
        Ok(value)
    }

    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }

    pub async fn is_warm(&self) -> bool {
        self.entry
            .lock()
            .await
            .as_ref()
            .is_some_and(|(loaded_at, _)| loaded_at.elapsed() < self.ttl)
    }
}

pub struct ContentCache {
    portfolio: CacheSlot<Vec<PortfolioItem>>,
    approved_reviews: CacheSlot<Vec<Review>>,
    settings: CacheSlot<Vec<SiteSetting>>,
}

impl ContentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            portfolio: CacheSlot::new(ttl),
            approved_reviews: CacheSlot::new(ttl),
            settings: CacheSlot::new(ttl),
        }
    }

    pub async fn portfolio(
        &self,
        store: &dyn PortfolioStore,
    ) -> Result<Arc<Vec<PortfolioItem>>, StoreError> {
        self.portfolio.get_or_load(|| store.list()).await
    }

    pub async fn approved_reviews(
        &self,
        store: &dyn ReviewStore,
    ) -> Result<Arc<Vec<Review>>, StoreError> {
        self.approved_reviews.get_or_load(|| store.list_approved()).await
    }

    /// Every stored settings row; sections pick the keys they need.
    pub async fn settings(
        &self,
        store: &dyn SettingsStore,
    ) -> Result<Arc<Vec<SiteSetting>>, StoreError> {
        self.settings.get_or_load(|| store.get_all()).await
    }

    pub async fn invalidate_portfolio(&self) {
        self.portfolio.invalidate().await;
    }

    pub async fn invalidate_reviews(&self) {
        self.approved_reviews.invalidate().await;
    }

    pub async fn invalidate_settings(&self) {
        self.settings.invalidate().await;
    }
}
