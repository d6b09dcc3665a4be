//! Database Models - records of the `portfolio`, `reviews` and `site_settings` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::content::category::{Category, MediaType};

/// Portfolio item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: String,
    pub category: Category,
    pub sub_category: String,
    pub client_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New portfolio item for insertion (already validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPortfolioItem {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: String,
    pub category: Category,
    pub sub_category: String,
    pub client_name: Option<String>,
}

/// Review / testimonial
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub author_name: String,
    pub author_image_url: Option<String>,
    pub review_text: String,
    pub rating: i32,
    pub is_approved: bool,
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// New review for insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub author_name: String,
    pub author_image_url: Option<String>,
    pub review_text: String,
    pub rating: i32,
    pub photos: Vec<String>,
}

/// Site setting row
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SiteSetting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// One key/value pair of a settings upsert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: serde_json::Value,
}

impl SettingEntry {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}
