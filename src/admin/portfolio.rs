//! Portfolio manager: list, create (upload then insert), delete.

use uuid::Uuid;

use super::{non_blank, UploadBatch};
use crate::content::category::{validate_sub_category, Category, MediaType};
use crate::db::models::{NewPortfolioItem, PortfolioItem};
use crate::error::{AppError, BackendContext};
use crate::media::{MediaKind, VideoSource};
use crate::state::AppState;
use crate::storage::UploadedFile;
use crate::store::StoreError;

pub const PORTFOLIO_FOLDER: &str = "portfolio";

const FETCH_FAILED: &str = "Failed to fetch portfolio items";
const CREATE_FAILED: &str = "Operation failed";
const DELETE_FAILED: &str = "Delete failed";

/// Editor input for a new item, as received.
#[derive(Debug, Clone, Default)]
pub struct PortfolioDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_type: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub client_name: Option<String>,
    /// External video link, used when no video file is attached.
    pub video_url: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Where the item's media comes from once validated.
#[derive(Debug, Clone, PartialEq)]
enum MediaSource {
    Upload(UploadedFile),
    Link(String),
}

#[derive(Debug, Clone, PartialEq)]
struct ValidDraft {
    title: String,
    description: Option<String>,
    media_type: MediaType,
    category: Category,
    sub_category: String,
    client_name: Option<String>,
    source: MediaSource,
}

fn validate(draft: PortfolioDraft) -> Result<ValidDraft, AppError> {
    let title =
        non_blank(draft.title).ok_or_else(|| AppError::validation("Please provide a title"))?;

    let media_type = match non_blank(draft.media_type) {
        Some(raw) => raw.parse::<MediaType>().map_err(AppError::Validation)?,
        None => MediaType::Image,
    };

    let source = match media_type {
        MediaType::Image => match draft.file {
            Some(file) if file.kind() == Some(MediaKind::Image) => MediaSource::Upload(file),
            _ => return Err(AppError::validation("Please select an image file")),
        },
        MediaType::Video => {
            let missing = || AppError::validation("Please provide a video file or a YouTube/Vimeo URL");
            match (draft.file, non_blank(draft.video_url)) {
                (Some(file), _) if file.kind() == Some(MediaKind::Video) => MediaSource::Upload(file),
                (Some(_), _) => return Err(missing()),
                (None, Some(url)) if VideoSource::parse(&url).is_playable() => MediaSource::Link(url),
                (None, _) => return Err(missing()),
            }
        }
    };

    let category = match non_blank(draft.category) {
        Some(raw) => raw.parse::<Category>().map_err(AppError::Validation)?,
        None => Category::for_media(media_type),
    };
    let sub_category = match non_blank(draft.sub_category) {
        Some(raw) => validate_sub_category(category, &raw).map_err(AppError::Validation)?,
        None => category.sub_categories()[0].to_string(),
    };

    Ok(ValidDraft {
        title,
        description: non_blank(draft.description),
        media_type,
        category,
        sub_category,
        client_name: non_blank(draft.client_name),
        source,
    })
}

pub async fn list(state: &AppState) -> Result<Vec<PortfolioItem>, AppError> {
    state.portfolio.list().await.or_backend(FETCH_FAILED)
}

pub async fn create(state: &AppState, draft: PortfolioDraft) -> Result<Vec<PortfolioItem>, AppError> {
    let valid = validate(draft)?;

    let mut uploads = UploadBatch::new(state.media.clone(), state.config.portfolio_bucket.clone());
    let url = match &valid.source {
        MediaSource::Upload(file) => uploads.upload(PORTFOLIO_FOLDER, file, "Upload failed").await?.public_url,
        MediaSource::Link(url) => url.clone(),
    };

    let new_item = NewPortfolioItem {
        title: valid.title,
        description: valid.description,
        media_type: valid.media_type,
        url,
        category: valid.category,
        sub_category: valid.sub_category,
        client_name: valid.client_name,
    };

    let created = match state.portfolio.create(new_item).await {
        Ok(item) => item,
        Err(e) => {
            uploads.rollback().await;
            return Err(e).or_backend(CREATE_FAILED);
        }
    };
    tracing::info!(id = %created.id, media_type = %created.media_type, "portfolio item created");

    state.cache.invalidate_portfolio().await;
    list(state).await
}

/// Remove the stored object if we own it, then the row. Storage failures
/// are logged and never block the row delete.
pub async fn delete(state: &AppState, id: Uuid) -> Result<Vec<PortfolioItem>, AppError> {
    let item = match state.portfolio.get(id).await {
        Ok(Some(item)) => Some(item),
        Ok(None) => return Err(AppError::NotFound("Portfolio item not found".to_string())),
        // Rows that break the category map never list, so drop them row-only.
        Err(StoreError::Invalid(e)) => {
            tracing::warn!(%id, error = %e, "deleting unreadable portfolio row");
            None
        }
        Err(e) => return Err(e).or_backend(DELETE_FAILED),
    };

    let bucket = &state.config.portfolio_bucket;
    if let Some(path) = item
        .as_ref()
        .and_then(|item| state.media.object_path(bucket, &item.url, PORTFOLIO_FOLDER))
    {
        if let Err(e) = state.media.remove(bucket, &path).await {
            tracing::warn!(%id, path = %path, error = %e, "stored object not removed");
        }
    }

    let deleted = state.portfolio.delete(id).await.or_backend(DELETE_FAILED)?;
    if !deleted {
        return Err(AppError::NotFound("Portfolio item not found".to_string()));
    }
    tracing::info!(%id, "portfolio item deleted");

    state.cache.invalidate_portfolio().await;
    list(state).await
}
