/**
 * Media Routes
 * Video URL classification for players in the site and the console preview
 */
use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::media::VideoEmbed;

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    #[serde(default)]
    pub url: String,
}

/// GET /api/media/embed?url=
pub async fn embed(Query(query): Query<EmbedQuery>) -> Json<VideoEmbed> {
    Json(VideoEmbed::from_url(query.url.trim()))
}
