//! Public contact links: `tel:` and WhatsApp deep links.

/// Digits only; spaces, dashes and a leading `+` are dropped.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn tel_link(phone: &str) -> String {
    format!("tel:{}", normalize_phone(phone))
}

/// Country code digits and the local number. A phone that already starts
/// with the code and is longer than a local number keeps it only once.
fn split_country_code(country_code: &str, phone: &str) -> (String, String) {
    let code = normalize_phone(country_code);
    let digits = normalize_phone(phone);
    if !code.is_empty() && digits.starts_with(&code) && digits.len() > 10 {
        let local = digits[code.len()..].to_string();
        (code, local)
    } else {
        (code, digits)
    }
}

/// `+<countrycode> <local number>` for display.
pub fn display_phone(country_code: &str, phone: &str) -> String {
    match split_country_code(country_code, phone) {
        (code, local) if code.is_empty() => local,
        (code, local) => format!("+{} {}", code, local),
    }
}

/// `https://wa.me/<countrycode><phone>?text=<message>`.
pub fn whatsapp_link(country_code: &str, phone: &str, message: &str) -> String {
    let (code, local) = split_country_code(country_code, phone);
    format!(
        "https://wa.me/{}{}?text={}",
        code,
        local,
        urlencoding::encode(message)
    )
}

pub fn mailto_link(email: &str) -> String {
    format!("mailto:{}", email.trim())
}
