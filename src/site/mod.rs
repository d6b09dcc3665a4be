//! Public site sections.
//!
//! Every section reads through the content cache and never fails: when the
//! store has nothing for it, or the read errors, static content is served
//! instead and `source` says which branch was taken.

pub mod contact;
pub mod hero;
pub mod layout;
pub mod portfolio;
pub mod services;
pub mod testimonials;
pub mod youtube;

use serde::Serialize;

use crate::content::settings::{fold_rows, SettingsMap};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    Store,
    FallbackEmpty,
    FallbackError,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<T> {
    pub source: SectionSource,
    pub data: T,
}

impl<T> Section<T> {
    pub fn new(source: SectionSource, data: T) -> Self {
        Self { source, data }
    }
}

/// Settings as the public site sees them: cached rows folded over `defaults`.
///
/// The source is `Store` when at least one of `keys` is stored.
pub(crate) async fn settings_view(
    state: &AppState,
    keys: &[&str],
    defaults: SettingsMap,
) -> (SectionSource, SettingsMap) {
    match state.cache.settings(state.settings.as_ref()).await {
        Ok(rows) => {
            let source = if rows.iter().any(|r| keys.contains(&r.key.as_str())) {
                SectionSource::Store
            } else {
                SectionSource::FallbackEmpty
            };
            (source, fold_rows(rows.iter().cloned(), defaults))
        }
        Err(e) => {
            tracing::warn!(error = %e, "settings unavailable, serving defaults");
            (SectionSource::FallbackError, defaults)
        }
    }
}
