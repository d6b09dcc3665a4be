//! In-process stores used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PortfolioStore, ReviewStore, SettingsStore, StoreError};
use crate::db::models::{NewPortfolioItem, NewReview, PortfolioItem, Review, SettingEntry, SiteSetting};

#[derive(Debug, Default)]
pub struct MemoryPortfolioStore {
    // Newest first.
    items: RwLock<Vec<PortfolioItem>>,
}

impl MemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioStore for MemoryPortfolioStore {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn create(&self, item: NewPortfolioItem) -> Result<PortfolioItem, StoreError> {
        let created = PortfolioItem {
            id: Uuid::new_v4(),
            title: item.title,
            description: item.description,
            media_type: item.media_type,
            url: item.url,
            category: item.category,
            sub_category: item.sub_category,
            client_name: item.client_name,
            created_at: Utc::now(),
        };
        self.items.write().await.insert(0, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() != before)
    }
}

#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self.reviews.read().await.clone())
    }

    async fn list_approved(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .filter(|r| r.is_approved)
            .cloned()
            .collect())
    }

    async fn create(&self, review: NewReview) -> Result<Review, StoreError> {
        let created = Review {
            id: Uuid::new_v4(),
            author_name: review.author_name,
            author_image_url: review.author_image_url,
            review_text: review.review_text,
            rating: review.rating,
            is_approved: false,
            photos: review.photos,
            created_at: Utc::now(),
        };
        self.reviews.write().await.insert(0, created.clone());
        Ok(created)
    }

    async fn toggle_approval(&self, id: Uuid) -> Result<Option<Review>, StoreError> {
        let mut reviews = self.reviews.write().await;
        Ok(reviews.iter_mut().find(|r| r.id == id).map(|r| {
            r.is_approved = !r.is_approved;
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        Ok(reviews.len() != before)
    }
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    rows: RwLock<BTreeMap<String, SiteSetting>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_all(&self) -> Result<Vec<SiteSetting>, StoreError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_by_keys(&self, keys: Vec<String>) -> Result<Vec<SiteSetting>, StoreError> {
        let rows = self.rows.read().await;
        Ok(keys.iter().filter_map(|k| rows.get(k).cloned()).collect())
    }

    async fn upsert_many(&self, entries: Vec<SettingEntry>) -> Result<(), StoreError> {
        // One write guard for the whole batch.
        let mut rows = self.rows.write().await;
        let now = Utc::now();
        for entry in entries {
            rows.insert(
                entry.key.clone(),
                SiteSetting {
                    key: entry.key,
                    value: entry.value,
                    updated_at: now,
                },
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::category::{Category, MediaType};
    use serde_json::json;

    fn new_item(title: &str) -> NewPortfolioItem {
        NewPortfolioItem {
            title: title.to_string(),
            description: None,
            media_type: MediaType::Image,
            url: format!("http://localhost/{}.jpg", title),
            category: Category::Photography,
            sub_category: "Wedding Photography".to_string(),
            client_name: None,
        }
    }

    #[tokio::test]
    async fn test_portfolio_lists_newest_first_and_deletes() {
        let store = MemoryPortfolioStore::new();
        let first = store.create(new_item("first")).await.unwrap();
        let second = store.create(new_item("second")).await.unwrap();

        let titles: Vec<_> = store.list().await.unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["second", "first"]);

        assert!(store.delete(first.id).await.unwrap());
        assert!(!store.delete(first.id).await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(store.get(second.id).await.unwrap().unwrap().title, "second");
    }

    #[tokio::test]
    async fn test_review_approval_toggles() {
        let store = MemoryReviewStore::new();
        let review = store
            .create(NewReview {
                author_name: "Asha".to_string(),
                author_image_url: None,
                review_text: "Lovely photos".to_string(),
                rating: 5,
                photos: vec![],
            })
            .await
            .unwrap();
        assert!(!review.is_approved);
        assert!(store.list_approved().await.unwrap().is_empty());

        let toggled = store.toggle_approval(review.id).await.unwrap().unwrap();
        assert!(toggled.is_approved);
        assert_eq!(store.list_approved().await.unwrap().len(), 1);

        assert!(store.toggle_approval(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_settings_upsert_overwrites_by_key() {
        let store = MemorySettingsStore::new();
        store
            .upsert_many(vec![SettingEntry::new("contact_phone", json!("1"))])
            .await
            .unwrap();
        store
            .upsert_many(vec![
                SettingEntry::new("contact_phone", json!("2")),
                SettingEntry::new("contact_email", json!("a@b.c")),
            ])
            .await
            .unwrap();

        let rows = store
            .get_by_keys(vec!["contact_phone".into(), "missing".into()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, json!("2"));
        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }
}
