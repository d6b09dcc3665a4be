use serde::Serialize;

use super::{settings_view, Section, SectionSource};
use crate::contact::tel_link;
use crate::content::settings::{GeneralSettings, HeroMediaType, HeroSettings};
use crate::state::AppState;

pub const FALLBACK_BACKGROUND: &str =
    "https://images.unsplash.com/photo-1492691527719-9d1e07e534b4?q=80&w=2070&auto=format&fit=crop";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub background_url: String,
    pub background_type: HeroMediaType,
    pub logo_video_url: Option<String>,
    pub call_link: String,
}

pub fn build(hero: &HeroSettings, phone: &str) -> HeroView {
    let (background_url, background_type) = if hero.hero_background_url.trim().is_empty() {
        (FALLBACK_BACKGROUND.to_string(), HeroMediaType::Image)
    } else {
        (hero.hero_background_url.clone(), hero.hero_background_type)
    };
    HeroView {
        background_url,
        background_type,
        logo_video_url: Some(hero.hero_logo_video_url.clone()).filter(|u| !u.trim().is_empty()),
        call_link: tel_link(phone),
    }
}

pub async fn render(state: &AppState) -> Section<HeroView> {
    let mut defaults = HeroSettings::defaults();
    defaults.extend(GeneralSettings::defaults());
    let (source, map) = settings_view(state, &HeroSettings::KEYS, defaults).await;

    let hero = HeroSettings::from_map(&map);
    let phone = GeneralSettings::from_map(&map).contact_phone;
    let source = match source {
        SectionSource::Store if hero.hero_background_url.trim().is_empty() => SectionSource::FallbackEmpty,
        other => other,
    };
    Section::new(source, build(&hero, &phone))
}
