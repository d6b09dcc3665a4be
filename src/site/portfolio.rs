//! Public portfolio grid with main/sub filtering.

use serde::{Deserialize, Serialize};

use super::{Section, SectionSource};
use crate::content::category::{Category, DisplayKind, MediaType};
use crate::db::models::PortfolioItem;
use crate::error::AppError;
use crate::media::VideoEmbed;
use crate::state::AppState;

pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioQuery {
    pub main: Option<String>,
    pub sub: Option<String>,
}

/// Parsed filter. `None` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortfolioFilter {
    pub main: Option<DisplayKind>,
    pub sub: Option<String>,
}

impl PortfolioFilter {
    pub fn parse(query: &PortfolioQuery) -> Result<Self, AppError> {
        let pick = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(ALL))
                .map(str::to_string)
        };
        let main = pick(&query.main)
            .map(|m| m.parse::<DisplayKind>().map_err(AppError::Validation))
            .transpose()?;
        Ok(Self {
            main,
            sub: pick(&query.sub),
        })
    }

    pub fn matches(&self, card: &PortfolioCard) -> bool {
        let main_ok = self.main.is_none_or(|m| card.kind == m);
        let sub_ok = self.sub.as_deref().is_none_or(|s| card.sub_category == s);
        main_ok && sub_ok
    }

    /// Sub-category choices offered under the selected main filter.
    pub fn sub_filters(&self) -> Vec<String> {
        match self.main {
            Some(kind) => kind
                .category()
                .sub_categories()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCard {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DisplayKind,
    pub title: String,
    pub category: Category,
    pub sub_category: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoEmbed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

impl From<&PortfolioItem> for PortfolioCard {
    fn from(item: &PortfolioItem) -> Self {
        Self {
            id: item.id.to_string(),
            kind: item.media_type.display_kind(),
            title: item.title.clone(),
            category: item.category,
            sub_category: item.sub_category.clone(),
            image: item.url.clone(),
            video: (item.media_type == MediaType::Video).then(|| VideoEmbed::from_url(&item.url)),
            client_name: item.client_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub main: String,
    pub sub: String,
    pub sub_filters: Vec<String>,
    pub items: Vec<PortfolioCard>,
}

const SAMPLES: &[(DisplayKind, &str, &str, &str)] = &[
    (
        DisplayKind::Photography,
        "Elegant Wedding",
        "Wedding Photography",
        "https://images.unsplash.com/photo-1511285560929-80b456fea0bc?q=80&w=1000",
    ),
    (
        DisplayKind::Videography,
        "Cinematic Highlights",
        "Wedding Videography",
        "https://images.unsplash.com/photo-1532712938310-34cb3982ef74?q=80&w=1000",
    ),
    (
        DisplayKind::Photography,
        "Candid Moments",
        "Candid Photography",
        "https://images.unsplash.com/photo-1469334031218-e382a71b716b?q=80&w=1000",
    ),
    (
        DisplayKind::Photography,
        "Pre-Wedding Shoot",
        "Pre-Wedding Photography",
        "https://images.unsplash.com/photo-1519225421980-715cb0215aed?q=80&w=1000",
    ),
    (
        DisplayKind::Videography,
        "Event Montage",
        "Event Videography",
        "https://images.unsplash.com/photo-1516035069371-29a1b244cc32?q=80&w=1000",
    ),
    (
        DisplayKind::Photography,
        "Grand Reception",
        "Event Photography",
        "https://images.unsplash.com/photo-1519741497674-611481863552?q=80&w=1000",
    ),
];

/// Shown while the store has no items or cannot be read.
pub fn sample_cards() -> Vec<PortfolioCard> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (kind, title, sub_category, image))| PortfolioCard {
            id: format!("sample-{}", i + 1),
            kind: *kind,
            title: title.to_string(),
            category: kind.category(),
            sub_category: sub_category.to_string(),
            image: image.to_string(),
            video: None,
            client_name: None,
        })
        .collect()
}

pub fn build(cards: Vec<PortfolioCard>, filter: &PortfolioFilter) -> PortfolioView {
    PortfolioView {
        main: filter.main.map(|m| m.as_str().to_string()).unwrap_or_else(|| ALL.to_string()),
        sub: filter.sub.clone().unwrap_or_else(|| ALL.to_string()),
        sub_filters: filter.sub_filters(),
        items: cards.into_iter().filter(|c| filter.matches(c)).collect(),
    }
}

pub async fn render(state: &AppState, filter: &PortfolioFilter) -> Section<PortfolioView> {
    let (source, cards) = match state.cache.portfolio(state.portfolio.as_ref()).await {
        Ok(items) if !items.is_empty() => (
            SectionSource::Store,
            items.iter().map(PortfolioCard::from).collect(),
        ),
        Ok(_) => (SectionSource::FallbackEmpty, sample_cards()),
        Err(e) => {
            tracing::warn!(error = %e, "portfolio unavailable, serving samples");
            (SectionSource::FallbackError, sample_cards())
        }
    };
    Section::new(source, build(cards, filter))
}
