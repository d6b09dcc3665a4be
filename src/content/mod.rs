//! Content model shared by the admin workflows and the public sections.

pub mod category;
pub mod settings;

pub use category::{Category, DisplayKind, MediaType};
pub use settings::{GeneralSettings, HeroMediaType, HeroSettings, SettingsMap, YoutubeVideo};
