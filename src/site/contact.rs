use serde::Serialize;

use super::{settings_view, Section};
use crate::config::AppConfig;
use crate::contact::{display_phone, mailto_link, normalize_phone, tel_link, whatsapp_link};
use crate::content::settings::{GeneralSettings, CONTACT_EMAIL, CONTACT_PHONE};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub phone: String,
    pub display_phone: String,
    pub tel_link: String,
    pub whatsapp_link: String,
    pub email: String,
    pub mailto_link: String,
}

pub fn build(settings: &GeneralSettings, config: &AppConfig) -> ContactView {
    let phone = normalize_phone(&settings.contact_phone);
    ContactView {
        display_phone: display_phone(&config.whatsapp_country_code, &phone),
        tel_link: tel_link(&phone),
        whatsapp_link: whatsapp_link(
            &config.whatsapp_country_code,
            &phone,
            &config.whatsapp_message,
        ),
        email: settings.contact_email.clone(),
        mailto_link: mailto_link(&settings.contact_email),
        phone,
    }
}

pub async fn render(state: &AppState) -> Section<ContactView> {
    let (source, map) = settings_view(
        state,
        &[CONTACT_PHONE, CONTACT_EMAIL],
        GeneralSettings::defaults(),
    )
    .await;
    Section::new(source, build(&GeneralSettings::from_map(&map), &state.config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_links() {
        let settings = GeneralSettings {
            contact_phone: "98453 74999".to_string(),
            contact_email: "studio@example.com".to_string(),
            ..GeneralSettings::default()
        };
        let config = AppConfig {
            whatsapp_country_code: "91".to_string(),
            whatsapp_message: "Hello there".to_string(),
            ..AppConfig::default()
        };
        let view = build(&settings, &config);
        assert_eq!(view.phone, "9845374999");
        assert_eq!(view.display_phone, "+91 9845374999");
        assert_eq!(view.tel_link, "tel:9845374999");
        assert_eq!(
            view.whatsapp_link,
            "https://wa.me/919845374999?text=Hello%20there"
        );
        assert_eq!(view.mailto_link, "mailto:studio@example.com");
    }

    #[test]
    fn test_stored_country_code_is_shown_once() {
        let settings = GeneralSettings {
            contact_phone: "+91 98453 74999".to_string(),
            ..GeneralSettings::default()
        };
        let config = AppConfig {
            whatsapp_country_code: "91".to_string(),
            ..AppConfig::default()
        };
        let view = build(&settings, &config);
        assert_eq!(view.display_phone, "+91 9845374999");
        assert!(view.whatsapp_link.starts_with("https://wa.me/919845374999?"));
    }
}
