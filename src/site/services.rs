use serde::Serialize;
use serde_json::Value;

use super::{settings_view, Section, SectionSource};
use crate::content::settings::{GeneralSettings, SERVICES};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

const STATIC_SERVICES: &[(&str, &str)] = &[
    (
        "Wedding Photography and Videography",
        "Traditional and cinematic coverage of your special day.",
    ),
    (
        "Candid Photography and Videography",
        "Natural, unposed moments filled with raw emotion and cinematic flair.",
    ),
    (
        "Pre-Wedding Shoots",
        "Creative and romantic sessions before you say 'I do'.",
    ),
    (
        "Event Photography and Videography",
        "Complete coverage for birthdays, anniversaries, and all social celebrations.",
    ),
    (
        "Corporate Photography and Videography",
        "Professional coverage for corporate events, seminars, and brand shoots.",
    ),
];

pub fn static_cards() -> Vec<ServiceCard> {
    STATIC_SERVICES
        .iter()
        .map(|(title, description)| ServiceCard {
            title: title.to_string(),
            description: Some(description.to_string()),
        })
        .collect()
}

pub fn build(services: &[String]) -> Vec<ServiceCard> {
    services
        .iter()
        .map(|title| ServiceCard {
            title: title.clone(),
            description: STATIC_SERVICES
                .iter()
                .find(|(t, _)| t.eq_ignore_ascii_case(title))
                .map(|(_, d)| d.to_string()),
        })
        .collect()
}

/// Cards from the `services` setting; the static cards when none are stored.
pub async fn render(state: &AppState) -> Section<Vec<ServiceCard>> {
    let (source, map) = settings_view(state, &[SERVICES], GeneralSettings::defaults()).await;
    let stored = matches!(map.get(SERVICES), Some(Value::Array(items)) if !items.is_empty());

    match source {
        SectionSource::Store if stored => {
            let cards = build(&GeneralSettings::from_map(&map).services);
            if cards.is_empty() {
                Section::new(SectionSource::FallbackEmpty, static_cards())
            } else {
                Section::new(SectionSource::Store, cards)
            }
        }
        SectionSource::FallbackError => Section::new(SectionSource::FallbackError, static_cards()),
        _ => Section::new(SectionSource::FallbackEmpty, static_cards()),
    }
}
