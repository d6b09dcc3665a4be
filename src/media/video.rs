//! Video URL classification for embedding.
//!
//! Raw file URLs play in a native `<video>` element; YouTube and Vimeo watch
//! URLs are turned into embeddable player URLs; anything else is not playable.

use regex::Regex;
use serde::Serialize;
use url::Url;

lazy_static::lazy_static! {
    /// Same shapes the site has always accepted: youtu.be/ID, /v/ID, /u/x/ID,
    /// /embed/ID, watch?v=ID and &v=ID.
    static ref YOUTUBE_ID: Regex =
        Regex::new(r"^.*(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").unwrap();
    static ref VIMEO_ID: Regex = Regex::new(r"vimeo\.com/(?:.*/)?(\d+)").unwrap();
}

const YOUTUBE_ID_LEN: usize = 11;

/// Shown when a YouTube thumbnail cannot be derived.
pub const FALLBACK_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1611162617263-43c2660ad1fe?q=80&w=1000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VideoSource {
    YouTube { id: String },
    Vimeo { id: String },
    File { url: String },
    Unplayable,
}

impl VideoSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return VideoSource::Unplayable;
        }

        let lower = raw.to_lowercase();
        if lower.contains("youtube.com") || lower.contains("youtu.be") {
            return youtube_id(raw)
                .map(|id| VideoSource::YouTube { id })
                .unwrap_or(VideoSource::Unplayable);
        }
        if lower.contains("vimeo.com") {
            return VIMEO_ID
                .captures(raw)
                .and_then(|c| c.get(1))
                .map(|m| VideoSource::Vimeo {
                    id: m.as_str().to_string(),
                })
                .unwrap_or(VideoSource::Unplayable);
        }

        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
                VideoSource::File {
                    url: raw.to_string(),
                }
            }
            _ => VideoSource::Unplayable,
        }
    }

    pub fn embed_url(&self) -> Option<String> {
        match self {
            VideoSource::YouTube { id } => Some(format!("https://www.youtube.com/embed/{}", id)),
            VideoSource::Vimeo { id } => Some(format!("https://player.vimeo.com/video/{}", id)),
            VideoSource::File { url } => Some(url.clone()),
            VideoSource::Unplayable => None,
        }
    }

    pub fn is_playable(&self) -> bool {
        !matches!(self, VideoSource::Unplayable)
    }
}

/// Extract an 11-character YouTube video id.
pub fn youtube_id(url: &str) -> Option<String> {
    let id = YOUTUBE_ID.captures(url)?.get(1)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

pub fn youtube_thumbnail(url: &str) -> String {
    match youtube_id(url) {
        Some(id) => format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id),
        None => FALLBACK_THUMBNAIL.to_string(),
    }
}

/// Everything a player needs for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEmbed {
    pub source: VideoSource,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl VideoEmbed {
    pub fn from_url(url: &str) -> Self {
        let source = VideoSource::parse(url);
        let thumbnail_url = match &source {
            VideoSource::YouTube { id } => {
                Some(format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id))
            }
            _ => None,
        };
        Self {
            embed_url: source.embed_url(),
            source,
            thumbnail_url,
        }
    }
}
