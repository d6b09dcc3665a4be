//! Navbar and footer content shared by every page.

use serde::Serialize;

use super::{settings_view, Section};
use crate::contact::tel_link;
use crate::content::settings::{
    GeneralSettings, CONTACT_EMAIL, CONTACT_PHONE, SERVICES, YOUTUBE_CHANNEL_URL,
};
use crate::state::AppState;

const NAV_LINKS: &[(&str, &str)] = &[
    ("About", "#about"),
    ("Services", "#services"),
    ("Portfolio", "#portfolio"),
    ("Reviews", "#reviews"),
    ("Contact", "#contact"),
];

const QUICK_LINKS: &[&str] = &["Hero", "About", "Services", "Portfolio", "Testimonials", "Contact"];

const FOOTER_SERVICE_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

impl NavLink {
    fn new(name: &str, href: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub quick_links: Vec<NavLink>,
    pub services: Vec<String>,
    pub phone: String,
    pub email: String,
    pub channel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutView {
    pub nav_links: Vec<NavLink>,
    pub call_link: String,
    pub footer: Footer,
}

pub fn build(settings: &GeneralSettings) -> LayoutView {
    LayoutView {
        nav_links: NAV_LINKS.iter().map(|(n, h)| NavLink::new(n, *h)).collect(),
        call_link: tel_link(&settings.contact_phone),
        footer: Footer {
            quick_links: QUICK_LINKS
                .iter()
                .map(|n| NavLink::new(n, format!("#{}", n.to_lowercase())))
                .collect(),
            services: settings
                .services
                .iter()
                .take(FOOTER_SERVICE_COUNT)
                .cloned()
                .collect(),
            phone: settings.contact_phone.clone(),
            email: settings.contact_email.clone(),
            channel_url: settings.youtube_channel_url.clone(),
        },
    }
}

pub async fn render(state: &AppState) -> Section<LayoutView> {
    let (source, map) = settings_view(
        state,
        &[CONTACT_PHONE, CONTACT_EMAIL, SERVICES, YOUTUBE_CHANNEL_URL],
        GeneralSettings::defaults(),
    )
    .await;
    Section::new(source, build(&GeneralSettings::from_map(&map)))
}
