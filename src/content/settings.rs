//! Typed views over the `site_settings` key/value table.
//!
//! The table stores loosely-typed JSON per key. Reads fold the stored rows
//! over in-memory defaults (a default only survives when its key is absent
//! from the store) and then parse the map into [`HeroSettings`] or
//! [`GeneralSettings`]. Writes go the other way through `to_entries`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::db::models::{SettingEntry, SiteSetting};

pub const HERO_BACKGROUND_URL: &str = "hero_background_url";
pub const HERO_BACKGROUND_TYPE: &str = "hero_background_type";
pub const HERO_LOGO_VIDEO_URL: &str = "hero_logo_video_url";
pub const YOUTUBE_VIDEOS: &str = "youtube_videos";
pub const YOUTUBE_CHANNEL_URL: &str = "youtube_channel_url";
pub const CONTACT_PHONE: &str = "contact_phone";
pub const CONTACT_EMAIL: &str = "contact_email";
pub const SERVICES: &str = "services";
/// Single-video key from before `youtube_videos` existed. Still written on save.
pub const LEGACY_YOUTUBE_VIDEO_URL: &str = "youtube_video_url";

pub type SettingsMap = BTreeMap<String, Value>;

const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const DEFAULT_CHANNEL_URL: &str = "https://www.youtube.com/";
const DEFAULT_PHONE: &str = "9000000000";
const DEFAULT_EMAIL: &str = "hello@example.com";

pub const DEFAULT_SERVICES: &[&str] = &[
    "Wedding Photography",
    "Candid Photography",
    "Pre-Wedding Shoots",
    "Event Photography",
    "Corporate Shoots",
    "Wedding Videography",
    "Candid Videography",
    "Pre-Wedding Videography",
    "Event Videography",
    "Corporate Videography",
];

/// Fold stored rows over defaults.
pub fn fold_rows(rows: impl IntoIterator<Item = SiteSetting>, defaults: SettingsMap) -> SettingsMap {
    let mut map = defaults;
    for row in rows {
        map.insert(row.key, row.value);
    }
    map
}

fn string_value(map: &SettingsMap, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

// ============================================================================
// Hero
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroMediaType {
    #[default]
    Video,
    Image,
}

impl HeroMediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            HeroMediaType::Video => "video",
            HeroMediaType::Image => "image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeroSettings {
    #[serde(default)]
    pub hero_background_url: String,
    #[serde(default)]
    pub hero_background_type: HeroMediaType,
    #[serde(default)]
    pub hero_logo_video_url: String,
}

impl HeroSettings {
    pub const KEYS: [&'static str; 3] = [HERO_BACKGROUND_URL, HERO_BACKGROUND_TYPE, HERO_LOGO_VIDEO_URL];

    pub fn defaults() -> SettingsMap {
        Self::default().to_map()
    }

    pub fn from_map(map: &SettingsMap) -> Self {
        let background_type = match string_value(map, HERO_BACKGROUND_TYPE).as_deref() {
            Some("image") => HeroMediaType::Image,
            _ => HeroMediaType::Video,
        };
        Self {
            hero_background_url: string_value(map, HERO_BACKGROUND_URL).unwrap_or_default(),
            hero_background_type: background_type,
            hero_logo_video_url: string_value(map, HERO_LOGO_VIDEO_URL).unwrap_or_default(),
        }
    }

    pub fn to_entries(&self) -> Vec<SettingEntry> {
        vec![
            SettingEntry::new(HERO_BACKGROUND_URL, json!(self.hero_background_url)),
            SettingEntry::new(HERO_BACKGROUND_TYPE, json!(self.hero_background_type.as_str())),
            SettingEntry::new(HERO_LOGO_VIDEO_URL, json!(self.hero_logo_video_url)),
        ]
    }

    fn to_map(&self) -> SettingsMap {
        self.to_entries().into_iter().map(|e| (e.key, e.value)).collect()
    }
}

/// A hero update as sent by the editor. Keys left out keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroSettingsPatch {
    pub hero_background_url: Option<String>,
    pub hero_background_type: Option<HeroMediaType>,
    pub hero_logo_video_url: Option<String>,
}

impl HeroSettingsPatch {
    /// Merge into `hero` and return the rows for the keys this patch carried.
    pub fn apply(self, hero: &mut HeroSettings) -> Vec<SettingEntry> {
        let mut keys = Vec::new();
        if let Some(url) = self.hero_background_url {
            hero.hero_background_url = url.trim().to_string();
            keys.push(HERO_BACKGROUND_URL);
        }
        if let Some(media_type) = self.hero_background_type {
            hero.hero_background_type = media_type;
            keys.push(HERO_BACKGROUND_TYPE);
        }
        if let Some(url) = self.hero_logo_video_url {
            hero.hero_logo_video_url = url.trim().to_string();
            keys.push(HERO_LOGO_VIDEO_URL);
        }
        hero.to_entries()
            .into_iter()
            .filter(|e| keys.contains(&e.key.as_str()))
            .collect()
    }
}

// ============================================================================
// General settings (videos, channel, contact, services)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
}

impl YoutubeVideo {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default)]
    pub youtube_videos: Vec<YoutubeVideo>,
    #[serde(default)]
    pub youtube_channel_url: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub services: Vec<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            youtube_videos: vec![YoutubeVideo {
                id: "default-1".to_string(),
                title: "Cinematic Wedding Highlights".to_string(),
                url: DEFAULT_VIDEO_URL.to_string(),
            }],
            youtube_channel_url: DEFAULT_CHANNEL_URL.to_string(),
            contact_phone: DEFAULT_PHONE.to_string(),
            contact_email: DEFAULT_EMAIL.to_string(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneralSettings {
    pub const KEYS: [&'static str; 5] = [
        YOUTUBE_VIDEOS,
        YOUTUBE_CHANNEL_URL,
        CONTACT_PHONE,
        CONTACT_EMAIL,
        SERVICES,
    ];

    /// Defaults for the scalar and list keys. `youtube_videos` is left out so
    /// that `from_map` can still fall back to the legacy single-video key.
    pub fn defaults() -> SettingsMap {
        let d = Self::default();
        let mut map = SettingsMap::new();
        map.insert(YOUTUBE_CHANNEL_URL.into(), json!(d.youtube_channel_url));
        map.insert(CONTACT_PHONE.into(), json!(d.contact_phone));
        map.insert(CONTACT_EMAIL.into(), json!(d.contact_email));
        map.insert(SERVICES.into(), json!(d.services));
        map
    }

    /// Keys read by the public sections, including the legacy video key.
    pub fn read_keys() -> Vec<String> {
        Self::KEYS
            .iter()
            .chain(std::iter::once(&LEGACY_YOUTUBE_VIDEO_URL))
            .map(|k| k.to_string())
            .collect()
    }

    pub fn from_map(map: &SettingsMap) -> Self {
        let defaults = Self::default();
        Self {
            youtube_videos: parse_videos(map),
            youtube_channel_url: string_value(map, YOUTUBE_CHANNEL_URL)
                .unwrap_or(defaults.youtube_channel_url),
            contact_phone: string_value(map, CONTACT_PHONE).unwrap_or(defaults.contact_phone),
            contact_email: string_value(map, CONTACT_EMAIL).unwrap_or(defaults.contact_email),
            services: match map.get(SERVICES) {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => defaults.services,
            },
        }
    }

    /// Rows written by one save: every general key, plus the legacy
    /// single-video key mirroring the first video when there is one.
    pub fn to_entries(&self) -> Vec<SettingEntry> {
        let mut entries = vec![
            SettingEntry::new(YOUTUBE_VIDEOS, json!(self.youtube_videos)),
            SettingEntry::new(YOUTUBE_CHANNEL_URL, json!(self.youtube_channel_url)),
            SettingEntry::new(CONTACT_PHONE, json!(self.contact_phone)),
            SettingEntry::new(CONTACT_EMAIL, json!(self.contact_email)),
            SettingEntry::new(SERVICES, json!(self.services)),
        ];
        if let Some(first) = self.youtube_videos.first() {
            entries.push(SettingEntry::new(LEGACY_YOUTUBE_VIDEO_URL, json!(first.url)));
        }
        entries
    }

    /// Trim fields and give ids to videos that arrived without one.
    pub fn normalize(&mut self) -> Result<(), String> {
        for video in &mut self.youtube_videos {
            video.title = video.title.trim().to_string();
            video.url = video.url.trim().to_string();
            if video.url.is_empty() {
                return Err("Every video needs a URL".to_string());
            }
            if video.id.trim().is_empty() {
                video.id = Uuid::new_v4().to_string();
            }
        }
        self.youtube_channel_url = self.youtube_channel_url.trim().to_string();
        self.contact_phone = self.contact_phone.trim().to_string();
        self.contact_email = self.contact_email.trim().to_string();
        self.services = self
            .services
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(())
    }

    pub fn add_video(&mut self, title: &str, url: &str) -> Result<YoutubeVideo, String> {
        let (title, url) = (title.trim(), url.trim());
        if title.is_empty() || url.is_empty() {
            return Err("Please provide a video title and URL".to_string());
        }
        let video = YoutubeVideo::new(title, url);
        self.youtube_videos.push(video.clone());
        Ok(video)
    }

    pub fn remove_video(&mut self, id: &str) -> bool {
        let before = self.youtube_videos.len();
        self.youtube_videos.retain(|v| v.id != id);
        self.youtube_videos.len() != before
    }

    /// Returns false when the service is blank or already listed.
    pub fn add_service(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.services.iter().any(|s| s == name) {
            return false;
        }
        self.services.push(name.to_string());
        true
    }

    pub fn remove_service(&mut self, name: &str) -> bool {
        let before = self.services.len();
        self.services.retain(|s| s != name);
        self.services.len() != before
    }
}

/// A settings update as sent by the console. Only the keys present are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettingsPatch {
    pub youtube_videos: Option<Vec<YoutubeVideo>>,
    pub youtube_channel_url: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub services: Option<Vec<String>>,
}

impl GeneralSettingsPatch {
    /// Merge into `settings` and return the keys this patch carried.
    pub fn apply(self, settings: &mut GeneralSettings) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if let Some(videos) = self.youtube_videos {
            settings.youtube_videos = videos;
            keys.push(YOUTUBE_VIDEOS);
        }
        if let Some(url) = self.youtube_channel_url {
            settings.youtube_channel_url = url;
            keys.push(YOUTUBE_CHANNEL_URL);
        }
        if let Some(phone) = self.contact_phone {
            settings.contact_phone = phone;
            keys.push(CONTACT_PHONE);
        }
        if let Some(email) = self.contact_email {
            settings.contact_email = email;
            keys.push(CONTACT_EMAIL);
        }
        if let Some(services) = self.services {
            settings.services = services;
            keys.push(SERVICES);
        }
        keys
    }
}

impl GeneralSettings {
    /// Rows for `keys` only. The legacy video key follows `youtube_videos`.
    pub fn entries_for(&self, keys: &[&str]) -> Vec<SettingEntry> {
        self.to_entries()
            .into_iter()
            .filter(|e| {
                keys.contains(&e.key.as_str())
                    || (e.key == LEGACY_YOUTUBE_VIDEO_URL && keys.contains(&YOUTUBE_VIDEOS))
            })
            .collect()
    }
}

/// `youtube_videos` has been stored as an array or as a single object. When
/// it was never stored, the legacy single URL stands in, then the sample video.
fn parse_videos(map: &SettingsMap) -> Vec<YoutubeVideo> {
    match map.get(YOUTUBE_VIDEOS) {
        Some(Value::Array(items)) => {
            return items
                .iter()
                .filter_map(|v| serde_json::from_value::<YoutubeVideo>(v.clone()).ok())
                .collect();
        }
        Some(obj @ Value::Object(_)) => {
            if let Ok(video) = serde_json::from_value::<YoutubeVideo>(obj.clone()) {
                return vec![video];
            }
        }
        _ => {}
    }

    match map.get(LEGACY_YOUTUBE_VIDEO_URL) {
        Some(Value::String(url)) if !url.trim().is_empty() => vec![YoutubeVideo {
            id: "legacy-1".to_string(),
            title: "Featured Highlights".to_string(),
            url: url.clone(),
        }],
        _ => GeneralSettings::default().youtube_videos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(key: &str, value: Value) -> SiteSetting {
        SiteSetting {
            key: key.to_string(),
            value,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fold_rows_defaults_only_fill_absent_keys() {
        let map = fold_rows(
            vec![row(CONTACT_PHONE, json!("1234567890"))],
            GeneralSettings::defaults(),
        );
        assert_eq!(map[CONTACT_PHONE], json!("1234567890"));
        assert_eq!(map[CONTACT_EMAIL], json!(DEFAULT_EMAIL));
    }

    #[test]
    fn test_to_entries_mirrors_first_video_to_legacy_key() {
        let mut settings = GeneralSettings::default();
        settings.youtube_videos = vec![
            YoutubeVideo::new("First", "https://www.youtube.com/watch?v=abc12345678"),
            YoutubeVideo::new("Second", "https://youtu.be/zzz12345678"),
        ];
        let entries = settings.to_entries();
        let legacy = entries
            .iter()
            .find(|e| e.key == LEGACY_YOUTUBE_VIDEO_URL)
            .expect("legacy key written");
        assert_eq!(legacy.value, json!("https://www.youtube.com/watch?v=abc12345678"));
    }

    #[test]
    fn test_parse_videos_respects_explicit_empty_list() {
        let mut map = SettingsMap::new();
        map.insert(YOUTUBE_VIDEOS.into(), json!([]));
        map.insert(LEGACY_YOUTUBE_VIDEO_URL.into(), json!("https://youtu.be/abc12345678"));
        assert!(GeneralSettings::from_map(&map).youtube_videos.is_empty());
    }

    #[test]
    fn test_parse_videos_defaults_when_nothing_stored() {
        let settings = GeneralSettings::from_map(&GeneralSettings::defaults());
        assert_eq!(settings.youtube_videos, GeneralSettings::default().youtube_videos);
    }

    #[test]
    fn test_to_entries_without_videos_skips_legacy_key() {
        let mut settings = GeneralSettings::default();
        settings.youtube_videos.clear();
        assert!(settings
            .to_entries()
            .iter()
            .all(|e| e.key != LEGACY_YOUTUBE_VIDEO_URL));
    }

    #[test]
    fn test_parse_videos_accepts_single_object() {
        let mut map = SettingsMap::new();
        map.insert(
            YOUTUBE_VIDEOS.into(),
            json!({"id": "x", "title": "Solo", "url": "https://youtu.be/abc12345678"}),
        );
        let settings = GeneralSettings::from_map(&map);
        assert_eq!(settings.youtube_videos.len(), 1);
        assert_eq!(settings.youtube_videos[0].title, "Solo");
    }

    #[test]
    fn test_parse_videos_falls_back_to_legacy_url() {
        let mut map = SettingsMap::new();
        map.insert(
            LEGACY_YOUTUBE_VIDEO_URL.into(),
            json!("https://www.youtube.com/watch?v=abc12345678"),
        );
        let settings = GeneralSettings::from_map(&map);
        assert_eq!(settings.youtube_videos[0].id, "legacy-1");
    }

    #[test]
    fn test_add_service_rejects_duplicates_and_blanks() {
        let mut settings = GeneralSettings::default();
        let before = settings.services.len();
        assert!(!settings.add_service("Wedding Photography"));
        assert!(!settings.add_service("   "));
        assert!(settings.add_service("Maternity Shoots"));
        assert_eq!(settings.services.len(), before + 1);
        assert!(settings.remove_service("Maternity Shoots"));
        assert!(!settings.remove_service("Maternity Shoots"));
    }

    #[test]
    fn test_add_and_remove_video() {
        let mut settings = GeneralSettings::default();
        assert!(settings.add_video("", "https://youtu.be/abc12345678").is_err());
        let id = settings
            .add_video("Demo", "https://www.youtube.com/watch?v=abc12345678")
            .unwrap()
            .id;
        assert!(settings.remove_video(&id));
        assert!(!settings.remove_video(&id));
    }

    #[test]
    fn test_general_patch_touches_only_present_keys() {
        let patch: GeneralSettingsPatch =
            serde_json::from_value(json!({ "contact_phone": "1234567890" })).unwrap();
        let mut settings = GeneralSettings::default();
        let keys = patch.apply(&mut settings);
        assert_eq!(keys, vec![CONTACT_PHONE]);
        assert_eq!(settings.contact_phone, "1234567890");
        assert_eq!(settings.services.len(), DEFAULT_SERVICES.len());

        let entries = settings.entries_for(&keys);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, CONTACT_PHONE);
    }

    #[test]
    fn test_entries_for_videos_carries_legacy_key() {
        let settings = GeneralSettings::default();
        let keys: Vec<String> = settings
            .entries_for(&[YOUTUBE_VIDEOS])
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec![YOUTUBE_VIDEOS, LEGACY_YOUTUBE_VIDEO_URL]);
    }

    #[test]
    fn test_hero_patch_keeps_absent_keys() {
        let mut hero = HeroSettings {
            hero_background_url: "http://cdn/hero.jpg".to_string(),
            hero_background_type: HeroMediaType::Image,
            hero_logo_video_url: String::new(),
        };
        let patch: HeroSettingsPatch =
            serde_json::from_value(json!({ "hero_logo_video_url": " http://cdn/logo.mp4 " })).unwrap();
        let entries = patch.apply(&mut hero);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, HERO_LOGO_VIDEO_URL);
        assert_eq!(hero.hero_background_url, "http://cdn/hero.jpg");
        assert_eq!(hero.hero_background_type, HeroMediaType::Image);
        assert_eq!(hero.hero_logo_video_url, "http://cdn/logo.mp4");
    }

    #[test]
    fn test_hero_settings_round_trip_through_map() {
        let hero = HeroSettings {
            hero_background_url: "http://cdn/hero.jpg".to_string(),
            hero_background_type: HeroMediaType::Image,
            hero_logo_video_url: String::new(),
        };
        let map: SettingsMap = hero
            .to_entries()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect();
        assert_eq!(HeroSettings::from_map(&map), hero);
    }
}
