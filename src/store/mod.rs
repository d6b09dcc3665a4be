//! Persistence ports for portfolio items, reviews and site settings.
//!
//! Two adapters exist: [`postgres`] for a configured database and [`memory`]
//! for running without one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::content::settings::{fold_rows, SettingsMap};
use crate::db::models::{NewPortfolioItem, NewReview, PortfolioItem, Review, SettingEntry, SiteSetting};

pub use memory::{MemoryPortfolioStore, MemoryReviewStore, MemorySettingsStore};
pub use postgres::{PgPortfolioStore, PgReviewStore, PgSettingsStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid record: {0}")]
    Invalid(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// All items, newest first.
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError>;

    async fn create(&self, item: NewPortfolioItem) -> Result<PortfolioItem, StoreError>;

    /// Returns false when no row had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Review>, StoreError>;

    async fn list_approved(&self) -> Result<Vec<Review>, StoreError>;

    async fn create(&self, review: NewReview) -> Result<Review, StoreError>;

    /// Flip `is_approved` in one step. `None` when the review does not exist.
    async fn toggle_approval(&self, id: Uuid) -> Result<Option<Review>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<SiteSetting>, StoreError>;

    async fn get_by_keys(&self, keys: Vec<String>) -> Result<Vec<SiteSetting>, StoreError>;

    /// Upsert every entry or none of them.
    async fn upsert_many(&self, entries: Vec<SettingEntry>) -> Result<(), StoreError>;
}

/// Read `keys` and fold the rows over `defaults`.
pub async fn load_settings(
    store: &dyn SettingsStore,
    keys: Vec<String>,
    defaults: SettingsMap,
) -> Result<SettingsMap, StoreError> {
    let rows = store.get_by_keys(keys).await?;
    Ok(fold_rows(rows, defaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_settings_prefers_stored_rows() {
        let mut store = MockSettingsStore::new();
        store.expect_get_by_keys().returning(|_| {
            Ok(vec![SiteSetting {
                key: "contact_phone".to_string(),
                value: json!("9845374999"),
                updated_at: Utc::now(),
            }])
        });

        let mut defaults = SettingsMap::new();
        defaults.insert("contact_phone".into(), json!("9000000000"));
        defaults.insert("contact_email".into(), json!("hello@example.com"));

        let map = load_settings(&store, vec!["contact_phone".into()], defaults)
            .await
            .unwrap();
        assert_eq!(map["contact_phone"], json!("9845374999"));
        assert_eq!(map["contact_email"], json!("hello@example.com"));
    }
}
