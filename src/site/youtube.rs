use serde::Serialize;

use super::{settings_view, Section};
use crate::content::settings::{
    GeneralSettings, YoutubeVideo, LEGACY_YOUTUBE_VIDEO_URL, YOUTUBE_CHANNEL_URL, YOUTUBE_VIDEOS,
};
use crate::media::video::{youtube_id, youtube_thumbnail};
use crate::media::VideoSource;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeCard {
    pub id: String,
    pub title: String,
    pub url: String,
    pub youtube_id: Option<String>,
    pub thumbnail_url: String,
    pub embed_url: Option<String>,
}

impl From<&YoutubeVideo> for YoutubeCard {
    fn from(video: &YoutubeVideo) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            url: video.url.clone(),
            youtube_id: youtube_id(&video.url),
            thumbnail_url: youtube_thumbnail(&video.url),
            embed_url: VideoSource::parse(&video.url).embed_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeView {
    pub videos: Vec<YoutubeCard>,
    pub channel_url: String,
}

pub fn build(settings: &GeneralSettings) -> YoutubeView {
    YoutubeView {
        videos: settings.youtube_videos.iter().map(YoutubeCard::from).collect(),
        channel_url: settings.youtube_channel_url.clone(),
    }
}

pub async fn render(state: &AppState) -> Section<YoutubeView> {
    let (source, map) = settings_view(
        state,
        &[YOUTUBE_VIDEOS, LEGACY_YOUTUBE_VIDEO_URL, YOUTUBE_CHANNEL_URL],
        GeneralSettings::defaults(),
    )
    .await;
    Section::new(source, build(&GeneralSettings::from_map(&map)))
}
