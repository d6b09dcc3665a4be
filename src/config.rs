//! Application configuration, read from the environment (after `.env`).

use bcrypt::{hash, DEFAULT_COST};
use std::path::PathBuf;

/// Development-only fallback secret; production refuses to start with it.
pub const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";

lazy_static::lazy_static! {
    /// Admin password hash, resolved once per process.
    ///
    /// `ADMIN_PASSWORD_HASH` (bcrypt) wins, then `ADMIN_PASSWORD` hashed at
    /// startup, then the development default "admin123".
    static ref ADMIN_PASSWORD_HASH: String = {
        if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH") {
            hash
        } else if let Ok(plain) = std::env::var("ADMIN_PASSWORD") {
            hash(&plain, DEFAULT_COST).unwrap_or_default()
        } else {
            hash("admin123", DEFAULT_COST).unwrap_or_default()
        }
    };
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub admin_password_hash: String,
    pub session_ttl_minutes: i64,
    pub login_max_attempts: usize,
    pub login_window_secs: u64,

    /// Directory holding one sub-directory per bucket.
    pub storage_root: PathBuf,
    /// Base URL under which `storage_root` is served, without trailing slash.
    pub storage_public_url: String,
    pub portfolio_bucket: String,
    pub uploads_bucket: String,
    pub max_upload_bytes: usize,

    pub content_cache_ttl_secs: u64,

    pub whatsapp_country_code: String,
    pub whatsapp_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = env_or("HOST", "127.0.0.1");
        let port = env_parse("PORT", 3001u16);
        let storage_public_url = std::env::var("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://{}:{}/storage", host, port));

        Self {
            environment: env_or("ENVIRONMENT", "development"),
            host,
            port,
            jwt_secret: env_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            admin_password_hash: ADMIN_PASSWORD_HASH.clone(),
            session_ttl_minutes: env_parse("SESSION_TTL_MINUTES", 8 * 60),
            login_max_attempts: env_parse("LOGIN_MAX_ATTEMPTS", 5),
            login_window_secs: env_parse("LOGIN_WINDOW_SECS", 60),
            storage_root: PathBuf::from(env_or("STORAGE_ROOT", "uploads")),
            storage_public_url: storage_public_url.trim_end_matches('/').to_string(),
            portfolio_bucket: env_or("PORTFOLIO_BUCKET", "portfolio"),
            uploads_bucket: env_or("UPLOADS_BUCKET", "project-uploads"),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", 100 * 1024 * 1024),
            content_cache_ttl_secs: env_parse("CONTENT_CACHE_TTL_SECS", 30),
            whatsapp_country_code: env_or("WHATSAPP_COUNTRY_CODE", "91"),
            whatsapp_message: env_or(
                "WHATSAPP_MESSAGE",
                "Hi, I would like to enquire about your photography/videography services.",
            ),
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Checks that must pass before serving production traffic.
    pub fn check_production(&self) -> Result<(), String> {
        if !self.is_production() {
            return Ok(());
        }
        if self.jwt_secret.is_empty() || self.jwt_secret == DEFAULT_JWT_SECRET {
            return Err("JWT_SECRET must be set to a secure, unique value in production".into());
        }
        if std::env::var("ADMIN_PASSWORD_HASH").is_err() && std::env::var("ADMIN_PASSWORD").is_err()
        {
            tracing::warn!(
                "SECURITY: Neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set. \
                 The fallback default password is insecure."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_usable() {
        let config = AppConfig::default();
        assert!(config.port > 0);
        assert!(config.session_ttl_minutes > 0);
        assert!(config.login_max_attempts >= 1);
        assert!(!config.storage_public_url.ends_with('/'));
        assert!(!config.portfolio_bucket.is_empty());
        assert!(!config.uploads_bucket.is_empty());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: "production".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            ..AppConfig::default()
        };
        assert!(config.check_production().is_err());
    }

    #[test]
    fn test_development_skips_production_checks() {
        let config = AppConfig {
            environment: "development".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            ..AppConfig::default()
        };
        assert!(config.check_production().is_ok());
    }
}
