//! Portfolio media types, categories and the category → sub-category map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PHOTOGRAPHY_SUB_CATEGORIES: &[&str] = &[
    "Wedding Photography",
    "Candid Photography",
    "Pre-Wedding Photography",
    "Event Photography",
    "Corporate Photography",
];

pub const VIDEOGRAPHY_SUB_CATEGORIES: &[&str] = &[
    "Wedding Videography",
    "Candid Videography",
    "Pre-Wedding Videography",
    "Event Videography",
    "Corporate Videography",
];

/// How a portfolio item is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// The public filter bucket this media type is listed under.
    pub fn display_kind(self) -> DisplayKind {
        match self {
            MediaType::Image => DisplayKind::Photography,
            MediaType::Video => DisplayKind::Videography,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" | "photo" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(format!("Unknown media type '{}'", other)),
        }
    }
}

/// Public-facing kind used by the portfolio page's main filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Photography,
    Videography,
}

impl DisplayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayKind::Photography => "photography",
            DisplayKind::Videography => "videography",
        }
    }

    pub fn category(self) -> Category {
        match self {
            DisplayKind::Photography => Category::Photography,
            DisplayKind::Videography => Category::Videography,
        }
    }
}

impl FromStr for DisplayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "photography" => Ok(DisplayKind::Photography),
            "videography" => Ok(DisplayKind::Videography),
            other => Err(format!("Unknown filter '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Photography,
    Videography,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Photography, Category::Videography];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Photography => "Photography",
            Category::Videography => "Videography",
        }
    }

    pub fn sub_categories(self) -> &'static [&'static str] {
        match self {
            Category::Photography => PHOTOGRAPHY_SUB_CATEGORIES,
            Category::Videography => VIDEOGRAPHY_SUB_CATEGORIES,
        }
    }

    pub fn allows(self, sub_category: &str) -> bool {
        self.sub_categories().contains(&sub_category)
    }

    /// Default category for a media type when the editor does not pick one.
    pub fn for_media(media_type: MediaType) -> Category {
        media_type.display_kind().category()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "photography" => Ok(Category::Photography),
            "videography" => Ok(Category::Videography),
            other => Err(format!("Unknown category '{}'", other)),
        }
    }
}

/// Validate a category/sub-category pair, returning the canonical spelling.
pub fn validate_sub_category(category: Category, sub_category: &str) -> Result<String, String> {
    let wanted = sub_category.trim();
    category
        .sub_categories()
        .iter()
        .find(|s| s.eq_ignore_ascii_case(wanted))
        .map(|s| s.to_string())
        .ok_or_else(|| {
            format!(
                "Sub-category '{}' does not belong to {}. Valid: {:?}",
                wanted,
                category,
                category.sub_categories()
            )
        })
}
