/**
 * Authentication Routes
 * Single shared admin password exchanged for an expiring session token
 */
use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::SuccessResponse;
use crate::error::AppError;
use crate::session::{check_password, extract_bearer_token, DASHBOARD_PATH};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    /// Where the console navigates after signing in.
    pub redirect: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/auth/login
pub async fn login(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let client_ip = addr.ip().to_string();

    if !state.login_limiter.check(&client_ip) {
        tracing::warn!(client_ip = %client_ip, "login rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    if payload.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    let valid = check_password(payload.password, state.config.admin_password_hash.clone())
        .await
        .map_err(|e| {
            tracing::error!("Password verification error: {}", e);
            AppError::Internal("Login failed".to_string())
        })?;

    if !valid {
        tracing::warn!(client_ip = %client_ip, "failed admin login");
        return Err(AppError::InvalidCredentials);
    }

    let issued = state.sessions.issue().map_err(|e| {
        tracing::error!("Failed to create session token: {}", e);
        AppError::Internal("Failed to create token".to_string())
    })?;

    tracing::info!(client_ip = %client_ip, "admin signed in");

    Ok(Json(LoginResponse {
        success: true,
        expires_at: issued.claims.expires_at(),
        access_token: issued.token,
        redirect: DASHBOARD_PATH.to_string(),
    }))
}

/// POST /api/auth/verify
/// Always 200; `isValid` tells the console whether to show the login form.
pub async fn verify_token(State(state): State<AppState>, headers: HeaderMap) -> Json<VerifyResponse> {
    let Some(token) = extract_bearer_token(&headers) else {
        return Json(VerifyResponse {
            success: false,
            is_valid: false,
            expires_at: None,
        });
    };

    match state.sessions.verify(&token).await {
        Ok(claims) => Json(VerifyResponse {
            success: true,
            is_valid: true,
            expires_at: Some(claims.expires_at()),
        }),
        Err(e) => {
            tracing::debug!("Token verification failed: {}", e);
            Json(VerifyResponse {
                success: false,
                is_valid: false,
                expires_at: None,
            })
        }
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<SuccessResponse> {
    if let Some(token) = extract_bearer_token(&headers) {
        state.sessions.revoke(&token).await;
    }
    Json(SuccessResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    fn auth_router(state: AppState) -> Router {
        Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/verify", post(verify_token))
            .route("/api/auth/logout", post(logout))
            .with_state(state)
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 12345))))
    }

    fn test_state(max_attempts: usize) -> AppState {
        AppState::in_memory(AppConfig {
            jwt_secret: "test-secret".to_string(),
            admin_password_hash: bcrypt::hash("letmein", 4).unwrap(),
            login_max_attempts: max_attempts,
            ..AppConfig::default()
        })
    }

    async fn post_json(
        app: Router,
        uri: &str,
        json: &impl serde::Serialize,
    ) -> (StatusCode, axum::body::Bytes) {
        let body = Body::from(serde_json::to_vec(json).unwrap());
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    async fn post_bearer(app: Router, uri: &str, token: &str) -> (StatusCode, axum::body::Bytes) {
        let req = Request::post(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    fn login_body(password: &str) -> LoginRequest {
        LoginRequest {
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_empty_password_returns_bad_request() {
        let (status, _) = post_json(auth_router(test_state(5)), "/api/auth/login", &login_body("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_unauthorized() {
        let (status, body) =
            post_json(auth_router(test_state(5)), "/api/auth/login", &login_body("wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid admin password");
        assert!(json.get("accessToken").is_none());
    }

    #[tokio::test]
    async fn test_login_success_returns_token_and_redirect() {
        let (status, body) =
            post_json(auth_router(test_state(5)), "/api/auth/login", &login_body("letmein")).await;
        assert_eq!(status, StatusCode::OK);
        let json: LoginResponse = serde_json::from_slice(&body).unwrap();
        assert!(json.success);
        assert!(!json.access_token.is_empty());
        assert_eq!(json.redirect, "/admin/dashboard");
        assert!(json.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_login_rate_limited_after_budget() {
        let state = test_state(2);
        for _ in 0..2 {
            let (status, _) =
                post_json(auth_router(state.clone()), "/api/auth/login", &login_body("wrong")).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        let (status, _) =
            post_json(auth_router(state), "/api/auth/login", &login_body("letmein")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_verify_without_token_is_not_valid() {
        let req = Request::post("/api/auth/verify").body(Body::empty()).unwrap();
        let res = auth_router(test_state(5)).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: VerifyResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!json.is_valid);
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let state = test_state(5);
        let token = state.sessions.issue().unwrap().token;

        let (_, body) = post_bearer(auth_router(state.clone()), "/api/auth/verify", &token).await;
        let json: VerifyResponse = serde_json::from_slice(&body).unwrap();
        assert!(json.is_valid);

        let (status, _) = post_bearer(auth_router(state.clone()), "/api/auth/logout", &token).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = post_bearer(auth_router(state), "/api/auth/verify", &token).await;
        let json: VerifyResponse = serde_json::from_slice(&body).unwrap();
        assert!(!json.is_valid);
    }
}
