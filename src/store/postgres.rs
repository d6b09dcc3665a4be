//! sqlx-backed stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{PortfolioStore, ReviewStore, SettingsStore, StoreError};
use crate::content::category::{validate_sub_category, Category, MediaType};
use crate::db::models::{NewPortfolioItem, NewReview, PortfolioItem, Review, SettingEntry, SiteSetting};

// ============================================================================
// Portfolio
// ============================================================================

/// Raw `portfolio` row; enum columns are TEXT.
#[derive(Debug, FromRow)]
struct PortfolioRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    #[sqlx(rename = "type")]
    media_type: String,
    url: String,
    category: String,
    sub_category: String,
    client_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PortfolioRow> for PortfolioItem {
    type Error = StoreError;

    fn try_from(row: PortfolioRow) -> Result<Self, Self::Error> {
        let media_type: MediaType = row.media_type.parse().map_err(StoreError::Invalid)?;
        let category: Category = row.category.parse().map_err(StoreError::Invalid)?;
        let sub_category =
            validate_sub_category(category, &row.sub_category).map_err(StoreError::Invalid)?;
        Ok(PortfolioItem {
            id: row.id,
            title: row.title,
            description: row.description,
            media_type,
            url: row.url,
            category,
            sub_category,
            client_name: row.client_name,
            created_at: row.created_at,
        })
    }
}

const PORTFOLIO_COLUMNS: &str =
    r#"id, title, description, "type", url, category, sub_category, client_name, created_at"#;

#[derive(Debug, Clone)]
pub struct PgPortfolioStore {
    pool: PgPool,
}

impl PgPortfolioStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        let rows = sqlx::query_as::<_, PortfolioRow>(&format!(
            "SELECT {} FROM portfolio ORDER BY created_at DESC",
            PORTFOLIO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        // Rows that break the category map are skipped, not fatal.
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match PortfolioItem::try_from(row) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(%id, error = %e, "skipping invalid portfolio row");
                        None
                    }
                }
            })
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        let row = sqlx::query_as::<_, PortfolioRow>(&format!(
            "SELECT {} FROM portfolio WHERE id = $1",
            PORTFOLIO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PortfolioItem::try_from).transpose()
    }

    async fn create(&self, item: NewPortfolioItem) -> Result<PortfolioItem, StoreError> {
        let row = sqlx::query_as::<_, PortfolioRow>(&format!(
            r#"
            INSERT INTO portfolio (title, description, "type", url, category, sub_category, client_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PORTFOLIO_COLUMNS
        ))
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.media_type.as_str())
        .bind(&item.url)
        .bind(item.category.as_str())
        .bind(&item.sub_category)
        .bind(&item.client_name)
        .fetch_one(&self.pool)
        .await?;

        PortfolioItem::try_from(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM portfolio WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Reviews
// ============================================================================

const REVIEW_COLUMNS: &str =
    "id, author_name, author_image_url, review_text, rating, is_approved, photos, created_at";

#[derive(Debug, Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        Ok(sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_approved(&self) -> Result<Vec<Review>, StoreError> {
        Ok(sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews WHERE is_approved = true ORDER BY created_at DESC",
            REVIEW_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, review: NewReview) -> Result<Review, StoreError> {
        Ok(sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (author_name, author_image_url, review_text, rating, photos)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(&review.author_name)
        .bind(&review.author_image_url)
        .bind(&review.review_text)
        .bind(review.rating)
        .bind(&review.photos)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn toggle_approval(&self, id: Uuid) -> Result<Option<Review>, StoreError> {
        Ok(sqlx::query_as::<_, Review>(&format!(
            "UPDATE reviews SET is_approved = NOT is_approved WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get_all(&self) -> Result<Vec<SiteSetting>, StoreError> {
        Ok(
            sqlx::query_as::<_, SiteSetting>("SELECT key, value, updated_at FROM site_settings")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_by_keys(&self, keys: Vec<String>) -> Result<Vec<SiteSetting>, StoreError> {
        Ok(sqlx::query_as::<_, SiteSetting>(
            "SELECT key, value, updated_at FROM site_settings WHERE key = ANY($1)",
        )
        .bind(&keys)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn upsert_many(&self, entries: Vec<SettingEntry>) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for entry in &entries {
            sqlx::query(
                r#"
                INSERT INTO site_settings (key, value, updated_at)
                VALUES ($1, $2, now())
                ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()
                "#,
            )
            .bind(&entry.key)
            .bind(&entry.value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(count = entries.len(), "settings upserted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, sub_category: &str) -> PortfolioRow {
        PortfolioRow {
            id: Uuid::new_v4(),
            title: "Sunset".to_string(),
            description: None,
            media_type: "image".to_string(),
            url: "http://localhost/a.jpg".to_string(),
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            client_name: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let item = PortfolioItem::try_from(row("Photography", "wedding photography")).unwrap();
        assert_eq!(item.category, Category::Photography);
        assert_eq!(item.sub_category, "Wedding Photography");
        assert_eq!(item.media_type, MediaType::Image);
    }

    #[test]
    fn test_portfolio_queries_use_type_column() {
        let columns: Vec<&str> = PORTFOLIO_COLUMNS.split(", ").collect();
        assert!(columns.contains(&"\"type\""));
        assert!(!columns.contains(&"media_type"));
    }

    #[test]
    fn test_row_with_mismatched_sub_category_is_rejected() {
        let result = PortfolioItem::try_from(row("Photography", "Wedding Videography"));
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn test_row_with_unknown_category_is_rejected() {
        assert!(PortfolioItem::try_from(row("Drone", "Wedding Photography")).is_err());
    }
}
