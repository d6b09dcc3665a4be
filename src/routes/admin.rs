/**
 * Admin Routes
 * Console endpoints for portfolio, reviews, site settings and hero media.
 * Every handler checks the session before touching any store.
 */
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_json, FormParts, SuccessResponse};
use crate::admin::{self, hero::HeroUpload, portfolio::PortfolioDraft, reviews::ReviewDraft};
use crate::content::settings::{GeneralSettings, GeneralSettingsPatch, HeroSettings, HeroSettingsPatch};
use crate::db::models::{PortfolioItem, Review};
use crate::error::AppError;
use crate::session::require_admin;
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct NewVideoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NewServiceRequest {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Portfolio
// ============================================================================

/// GET /api/admin/portfolio
pub async fn list_portfolio(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PortfolioItem>>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::portfolio::list(&state).await?))
}

/// POST /api/admin/portfolio (multipart)
///
/// Fields: `title`, `description`, `type`, `category`, `sub_category`,
/// `client_name`, `video_url`, file part `file`.
pub async fn create_portfolio(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<PortfolioItem>>), AppError> {
    require_admin(&state, &headers).await?;
    let mut form = FormParts::read(multipart).await?;

    let draft = PortfolioDraft {
        title: form.text("title"),
        description: form.text("description"),
        media_type: form.text("type"),
        category: form.text("category"),
        sub_category: form.text("sub_category"),
        client_name: form.text("client_name"),
        video_url: form.text("video_url"),
        file: form.take_file("file"),
    };

    let items = admin::portfolio::create(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(items)))
}

/// DELETE /api/admin/portfolio/{id}
pub async fn delete_portfolio(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PortfolioItem>>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::portfolio::delete(&state, id).await?))
}

// ============================================================================
// Reviews
// ============================================================================

/// GET /api/admin/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Review>>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::reviews::list(&state).await?))
}

/// POST /api/admin/reviews (multipart)
///
/// Fields: `author_name`, `review_text`, `rating`, file parts `avatar` and
/// `photos` (repeatable).
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Review>), AppError> {
    require_admin(&state, &headers).await?;
    let mut form = FormParts::read(multipart).await?;

    let rating = match form.text("rating").map(|r| r.trim().to_string()) {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<i32>()
                .map_err(|_| AppError::validation("Rating must be a number from 1 to 5"))?,
        ),
        _ => None,
    };

    let draft = ReviewDraft {
        author_name: form.text("author_name"),
        review_text: form.text("review_text"),
        rating,
        avatar: form.take_file("avatar"),
        photos: form.take_files("photos"),
    };

    let review = admin::reviews::create(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// POST /api/admin/reviews/{id}/approval
pub async fn toggle_review_approval(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Review>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::reviews::toggle_approval(&state, id).await?))
}

/// DELETE /api/admin/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    require_admin(&state, &headers).await?;
    admin::reviews::delete(&state, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

// ============================================================================
// Site settings
// ============================================================================

/// GET /api/admin/settings
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<GeneralSettings>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::settings::load(&state).await?))
}

/// PUT /api/admin/settings
///
/// Only the keys present in the body are written.
pub async fn save_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GeneralSettings>, AppError> {
    require_admin(&state, &headers).await?;
    let patch: GeneralSettingsPatch = parse_json(&body)?;
    Ok(Json(admin::settings::update(&state, patch).await?))
}

/// POST /api/admin/settings/videos
pub async fn add_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GeneralSettings>, AppError> {
    require_admin(&state, &headers).await?;
    let payload: NewVideoRequest = parse_json(&body)?;
    Ok(Json(
        admin::settings::add_video(&state, &payload.title, &payload.url).await?,
    ))
}

/// DELETE /api/admin/settings/videos/{id}
pub async fn remove_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<GeneralSettings>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::settings::remove_video(&state, &id).await?))
}

/// POST /api/admin/settings/services
pub async fn add_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GeneralSettings>, AppError> {
    require_admin(&state, &headers).await?;
    let payload: NewServiceRequest = parse_json(&body)?;
    Ok(Json(admin::settings::add_service(&state, &payload.name).await?))
}

/// DELETE /api/admin/settings/services/{name}
pub async fn remove_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<GeneralSettings>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::settings::remove_service(&state, &name).await?))
}

// ============================================================================
// Hero
// ============================================================================

/// GET /api/admin/hero
pub async fn get_hero(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HeroSettings>, AppError> {
    require_admin(&state, &headers).await?;
    Ok(Json(admin::hero::load(&state).await?))
}

/// PUT /api/admin/hero
pub async fn save_hero(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<HeroSettings>, AppError> {
    require_admin(&state, &headers).await?;
    let patch: HeroSettingsPatch = parse_json(&body)?;
    Ok(Json(admin::hero::save(&state, patch).await?))
}

/// POST /api/admin/hero/upload (multipart, file part `file`)
pub async fn upload_hero_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<HeroUpload>, AppError> {
    require_admin(&state, &headers).await?;
    let mut form = FormParts::read(multipart).await?;
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::validation("Please select an image or video file"))?;
    Ok(Json(admin::hero::upload(&state, file).await?))
}
