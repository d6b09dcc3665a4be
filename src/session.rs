//! Admin session gate.
//!
//! A single shared admin password (bcrypt hash) is exchanged for a signed,
//! expiring JWT. Logout revokes a token until it would have expired anyway.
//! Login attempts are throttled per client IP.

use axum::http::HeaderMap;
use bcrypt::verify;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration as StdDuration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_SUBJECT: &str = "admin";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("session revoked")]
    Revoked,

    #[error("password check failed: {0}")]
    Hash(String),
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: Claims,
}

/// Hash a token for the revocation list using SHA-256.
fn token_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct SessionGate {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    /// sha256(token) -> exp of the revoked token.
    revoked: RwLock<HashMap<String, i64>>,
}

impl SessionGate {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes.max(1)),
            revoked: RwLock::new(HashMap::new()),
        }
    }

    pub fn issue(&self) -> Result<IssuedSession, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            role: ADMIN_SUBJECT.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedSession { token, claims })
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;

        if self.revoked.read().await.contains_key(&token_key(token)) {
            return Err(SessionError::Revoked);
        }
        Ok(claims)
    }

    /// Revoke a token. Unknown or already-expired tokens are ignored.
    pub async fn revoke(&self, token: &str) {
        let exp = match self.verify(token).await {
            Ok(claims) => claims.exp,
            Err(_) => return,
        };
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, expires| *expires > now);
        revoked.insert(token_key(token), exp);
        tracing::info!("admin session revoked");
    }

    pub async fn revoked_count(&self) -> usize {
        self.revoked.read().await.len()
    }
}

/// Sliding-window login throttle keyed by client IP.
pub struct LoginLimiter {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
    max_attempts: usize,
    window: StdDuration,
}

impl LoginLimiter {
    pub fn new(max_attempts: usize, window_secs: u64) -> Self {
        Self::with_window(max_attempts, StdDuration::from_secs(window_secs))
    }

    pub fn with_window(max_attempts: usize, window: StdDuration) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            max_attempts: max_attempts.max(1),
            window,
        }
    }

    /// Record an attempt. Returns false once the IP is over its budget.
    pub fn check(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Expire every IP's attempts, not just this one's.
        attempts.retain(|_, times| {
            times.retain(|&t| now.duration_since(t) < self.window);
            !times.is_empty()
        });

        let entry = attempts.entry(ip.to_string()).or_default();
        if entry.len() >= self.max_attempts {
            return false;
        }
        entry.push(now);
        true
    }

    /// Number of IPs with attempts still inside the window.
    pub fn tracked_ips(&self) -> usize {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// Verify a password against a bcrypt hash off the async executor.
pub async fn check_password(password: String, hash: String) -> Result<bool, SessionError> {
    tokio::task::spawn_blocking(move || verify(&password, &hash))
        .await
        .map_err(|e| SessionError::Hash(e.to_string()))?
        .map_err(|e| SessionError::Hash(e.to_string()))
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// An authenticated admin request.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub claims: Claims,
}

/// Gate for every admin endpoint.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<AdminSession, AppError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Authorization required".to_string()))?;

    match state.sessions.verify(&token).await {
        Ok(claims) => Ok(AdminSession { token, claims }),
        Err(e) => {
            tracing::debug!("session rejected: {}", e);
            Err(AppError::Unauthorized("Invalid or expired session".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_issue_then_verify() {
        let gate = SessionGate::new("test-secret", 30);
        let issued = gate.issue().unwrap();
        let claims = gate.verify(&issued.token).await.unwrap();
        assert_eq!(claims.sub, ADMIN_SUBJECT);
        assert_eq!(claims, issued.claims);
        assert!(claims.expires_at() > Utc::now());
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let gate = SessionGate::new("test-secret", 30);
        let a = gate.issue().unwrap();
        let b = gate.issue().unwrap();
        assert_ne!(a.claims.jti, b.claims.jti);
        assert_ne!(a.token, b.token);
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let issued = SessionGate::new("secret-a", 30).issue().unwrap();
        let other = SessionGate::new("secret-b", 30);
        assert!(matches!(
            other.verify(&issued.token).await,
            Err(SessionError::Token(_))
        ));
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let gate = SessionGate::new("test-secret", 30);
        let issued = gate.issue().unwrap();
        gate.revoke(&issued.token).await;
        assert!(matches!(
            gate.verify(&issued.token).await,
            Err(SessionError::Revoked)
        ));
        assert_eq!(gate.revoked_count().await, 1);

        gate.revoke("garbage").await;
        assert_eq!(gate.revoked_count().await, 1);
    }

    #[test]
    fn test_login_limiter_blocks_after_budget() {
        let limiter = LoginLimiter::new(2, 60);
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn test_login_limiter_forgets_idle_ips() {
        let limiter = LoginLimiter::with_window(5, StdDuration::from_millis(50));
        for i in 0..1000 {
            assert!(limiter.check(&format!("10.0.{}.{}", i / 256, i % 256)));
        }
        assert_eq!(limiter.tracked_ips(), 1000);

        std::thread::sleep(StdDuration::from_millis(80));
        assert!(limiter.check("192.168.1.1"));
        assert_eq!(limiter.tracked_ips(), 1);
    }

    #[tokio::test]
    async fn test_check_password() {
        let hash = bcrypt::hash("letmein", 4).unwrap();
        assert!(check_password("letmein".into(), hash.clone()).await.unwrap());
        assert!(!check_password("wrong".into(), hash).await.unwrap());
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc"));
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
