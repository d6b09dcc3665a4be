//! Reviews manager: list, create with avatar and gallery uploads, approval
//! toggle and delete.

use uuid::Uuid;

use super::{non_blank, UploadBatch};
use crate::db::models::{NewReview, Review};
use crate::error::{AppError, BackendContext};
use crate::media::MediaKind;
use crate::state::AppState;
use crate::storage::UploadedFile;

pub const AVATAR_FOLDER: &str = "reviews/avatars";
pub const GALLERY_FOLDER: &str = "reviews/gallery";

pub const DEFAULT_RATING: i32 = 5;

const ADD_FAILED: &str = "Failed to add review";

#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub author_name: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<i32>,
    pub avatar: Option<UploadedFile>,
    pub photos: Vec<UploadedFile>,
}

pub fn clamp_rating(rating: Option<i32>) -> i32 {
    rating.unwrap_or(DEFAULT_RATING).clamp(1, 5)
}

pub async fn list(state: &AppState) -> Result<Vec<Review>, AppError> {
    state.reviews.list().await.or_backend("Failed to fetch reviews")
}

pub async fn create(state: &AppState, draft: ReviewDraft) -> Result<Review, AppError> {
    let (author_name, review_text) = match (non_blank(draft.author_name), non_blank(draft.review_text)) {
        (Some(name), Some(text)) => (name, text),
        _ => return Err(AppError::validation("Please fill in all fields")),
    };
    let is_image = |f: &UploadedFile| f.kind() == Some(MediaKind::Image);
    if !draft.avatar.iter().all(is_image) || !draft.photos.iter().all(is_image) {
        return Err(AppError::validation("Please select an image file"));
    }

    // Uploads run one after another so a failure leaves a known prefix to undo.
    let mut uploads = UploadBatch::new(state.media.clone(), state.config.uploads_bucket.clone());
    let author_image_url = match &draft.avatar {
        Some(file) => Some(uploads.upload(AVATAR_FOLDER, file, ADD_FAILED).await?.public_url),
        None => None,
    };
    let mut photos = Vec::with_capacity(draft.photos.len());
    for file in &draft.photos {
        photos.push(uploads.upload(GALLERY_FOLDER, file, ADD_FAILED).await?.public_url);
    }

    let new_review = NewReview {
        author_name,
        author_image_url,
        review_text,
        rating: clamp_rating(draft.rating),
        photos,
    };

    match state.reviews.create(new_review).await {
        Ok(review) => {
            tracing::info!(id = %review.id, photos = review.photos.len(), "review added");
            state.cache.invalidate_reviews().await;
            Ok(review)
        }
        Err(e) => {
            uploads.rollback().await;
            Err(e).or_backend(ADD_FAILED)
        }
    }
}

pub async fn toggle_approval(state: &AppState, id: Uuid) -> Result<Review, AppError> {
    let review = state
        .reviews
        .toggle_approval(id)
        .await
        .or_backend("Update failed")?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    tracing::info!(%id, approved = review.is_approved, "review approval changed");
    state.cache.invalidate_reviews().await;
    Ok(review)
}

/// Removes the row only; uploaded photos stay in the bucket.
pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if !state.reviews.delete(id).await.or_backend("Delete failed")? {
        return Err(AppError::NotFound("Review not found".to_string()));
    }
    tracing::info!(%id, "review deleted");
    state.cache.invalidate_reviews().await;
    Ok(())
}
