//! Hero manager: background and logo media.

use serde::Serialize;

use super::settings::{load_map, write_entries};
use super::UploadBatch;
use crate::content::settings::{HeroMediaType, HeroSettings, HeroSettingsPatch};
use crate::error::AppError;
use crate::media::MediaKind;
use crate::state::AppState;
use crate::storage::UploadedFile;

pub const HERO_FOLDER: &str = "hero";

/// A freshly uploaded hero asset. The editor saves it into a hero field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroUpload {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: HeroMediaType,
}

pub async fn load(state: &AppState) -> Result<HeroSettings, AppError> {
    let keys = HeroSettings::KEYS.iter().map(|k| k.to_string()).collect();
    let map = load_map(state, keys, HeroSettings::defaults()).await?;
    Ok(HeroSettings::from_map(&map))
}

pub async fn upload(state: &AppState, file: UploadedFile) -> Result<HeroUpload, AppError> {
    let media_type = match file.kind() {
        Some(MediaKind::Video) => HeroMediaType::Video,
        Some(MediaKind::Image) => HeroMediaType::Image,
        None => return Err(AppError::validation("Please select an image or video file")),
    };

    let stored = UploadBatch::new(state.media.clone(), state.config.uploads_bucket.clone())
        .upload(HERO_FOLDER, &file, "Upload failed")
        .await?;

    Ok(HeroUpload {
        url: stored.public_url,
        media_type,
    })
}

/// Write the hero keys the editor sent. The rest keep their stored value.
pub async fn save(state: &AppState, patch: HeroSettingsPatch) -> Result<HeroSettings, AppError> {
    let mut hero = load(state).await?;
    let entries = patch.apply(&mut hero);
    if entries.is_empty() {
        return Ok(hero);
    }
    write_entries(state, entries).await?;
    load(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::storage::LocalMediaStorage;
    use crate::store::{MemoryPortfolioStore, MemoryReviewStore, MemorySettingsStore};
    use std::sync::Arc;

    fn state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(
            AppConfig::default(),
            Arc::new(MemoryPortfolioStore::new()),
            Arc::new(MemoryReviewStore::new()),
            Arc::new(MemorySettingsStore::new()),
            Arc::new(LocalMediaStorage::new(dir.path(), "http://localhost/storage")),
        )
    }

    #[tokio::test]
    async fn test_upload_infers_type_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);

        let video = upload(&state, UploadedFile::new("intro.mp4", Some("video/mp4"), b"mp4".to_vec()))
            .await
            .unwrap();
        assert_eq!(video.media_type, HeroMediaType::Video);
        assert!(video.url.contains("/project-uploads/hero/"));

        let image = upload(
            &state,
            UploadedFile::new("bg.jpg", Some("image/jpeg"), vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .await
        .unwrap();
        assert_eq!(image.media_type, HeroMediaType::Image);

        let err = upload(&state, UploadedFile::new("a.txt", Some("text/plain"), b"hi".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        assert_eq!(load(&state).await.unwrap(), HeroSettings::default());

        let saved = save(
            &state,
            HeroSettingsPatch {
                hero_background_url: Some(" http://localhost/storage/project-uploads/hero/a.jpg ".into()),
                hero_background_type: Some(HeroMediaType::Image),
                hero_logo_video_url: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(
            saved.hero_background_url,
            "http://localhost/storage/project-uploads/hero/a.jpg"
        );
        assert_eq!(saved.hero_background_type, HeroMediaType::Image);
    }

    #[tokio::test]
    async fn test_partial_save_keeps_background() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        save(
            &state,
            HeroSettingsPatch {
                hero_background_url: Some("http://localhost/storage/project-uploads/hero/bg.jpg".into()),
                hero_background_type: Some(HeroMediaType::Image),
                hero_logo_video_url: None,
            },
        )
        .await
        .unwrap();

        let saved = save(
            &state,
            HeroSettingsPatch {
                hero_logo_video_url: Some("http://localhost/storage/project-uploads/hero/logo.mp4".into()),
                ..HeroSettingsPatch::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(
            saved.hero_background_url,
            "http://localhost/storage/project-uploads/hero/bg.jpg"
        );
        assert_eq!(saved.hero_background_type, HeroMediaType::Image);
        assert_eq!(
            saved.hero_logo_video_url,
            "http://localhost/storage/project-uploads/hero/logo.mp4"
        );

        let unchanged = save(&state, HeroSettingsPatch::default()).await.unwrap();
        assert_eq!(unchanged, saved);
    }
}
