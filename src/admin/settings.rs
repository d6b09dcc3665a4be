//! Site settings manager: YouTube videos, channel link, contact details and
//! the services list.

use crate::content::settings::{GeneralSettings, GeneralSettingsPatch, SettingsMap};
use crate::db::models::SettingEntry;
use crate::error::{AppError, BackendContext};
use crate::state::AppState;
use crate::store;

const LOAD_FAILED: &str = "Failed to load settings";
const SAVE_FAILED: &str = "Failed to save settings";

pub(crate) async fn load_map(
    state: &AppState,
    keys: Vec<String>,
    defaults: SettingsMap,
) -> Result<SettingsMap, AppError> {
    store::load_settings(state.settings.as_ref(), keys, defaults)
        .await
        .or_backend(LOAD_FAILED)
}

/// Write one batch atomically and drop cached settings.
pub(crate) async fn write_entries(state: &AppState, entries: Vec<SettingEntry>) -> Result<(), AppError> {
    let count = entries.len();
    state.settings.upsert_many(entries).await.or_backend(SAVE_FAILED)?;
    tracing::info!(count, "settings saved");
    state.cache.invalidate_settings().await;
    Ok(())
}

pub async fn load(state: &AppState) -> Result<GeneralSettings, AppError> {
    let map = load_map(state, GeneralSettings::read_keys(), GeneralSettings::defaults()).await?;
    Ok(GeneralSettings::from_map(&map))
}

pub async fn save(state: &AppState, mut settings: GeneralSettings) -> Result<GeneralSettings, AppError> {
    settings.normalize().map_err(AppError::Validation)?;
    write_entries(state, settings.to_entries()).await?;
    load(state).await
}

/// Apply a console edit. Keys missing from the patch keep their stored value.
pub async fn update(state: &AppState, patch: GeneralSettingsPatch) -> Result<GeneralSettings, AppError> {
    let mut settings = load(state).await?;
    let keys = patch.apply(&mut settings);
    if keys.is_empty() {
        return Ok(settings);
    }
    settings.normalize().map_err(AppError::Validation)?;
    write_entries(state, settings.entries_for(&keys)).await?;
    load(state).await
}

pub async fn add_video(state: &AppState, title: &str, url: &str) -> Result<GeneralSettings, AppError> {
    let mut settings = load(state).await?;
    settings.add_video(title, url).map_err(AppError::Validation)?;
    save(state, settings).await
}

pub async fn remove_video(state: &AppState, id: &str) -> Result<GeneralSettings, AppError> {
    let mut settings = load(state).await?;
    if !settings.remove_video(id) {
        return Err(AppError::NotFound("Video not found".to_string()));
    }
    save(state, settings).await
}

/// Blank or already-listed services leave the settings untouched.
pub async fn add_service(state: &AppState, name: &str) -> Result<GeneralSettings, AppError> {
    let mut settings = load(state).await?;
    if !settings.add_service(name) {
        return Ok(settings);
    }
    save(state, settings).await
}

pub async fn remove_service(state: &AppState, name: &str) -> Result<GeneralSettings, AppError> {
    let mut settings = load(state).await?;
    if !settings.remove_service(name) {
        return Ok(settings);
    }
    save(state, settings).await
}
