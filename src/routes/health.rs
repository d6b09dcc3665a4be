/**
 * Health Routes
 * Liveness, database, media storage and readiness checks
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::state::AppState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Single service check result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Detailed health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    pub checks: HealthChecks,
}

/// Health checks for all services
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: ServiceCheck,
    pub storage: ServiceCheck,
}

/// Ready check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<ReadyChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ready checks summary
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyChecks {
    pub database: String,
    pub storage: String,
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

/// GET /health - Simple health ping
/// Returns "OK" or JSON { status: "ok" }
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// "disabled" when running on in-memory stores.
async fn database_check() -> ServiceCheck {
    if crate::db::get_pool().is_none() {
        return ServiceCheck {
            status: "disabled".to_string(),
            response_time: None,
            error: None,
        };
    }
    match crate::db::health_check().await {
        Ok(duration) => ServiceCheck {
            status: "healthy".to_string(),
            response_time: Some(duration.as_millis() as u64),
            error: None,
        },
        Err(e) => ServiceCheck {
            status: "unhealthy".to_string(),
            response_time: None,
            error: Some(e.to_string()),
        },
    }
}

async fn storage_check(state: &AppState) -> ServiceCheck {
    let start = Instant::now();
    match state.media.health_check().await {
        Ok(()) => ServiceCheck {
            status: "healthy".to_string(),
            response_time: Some(start.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => ServiceCheck {
            status: "unhealthy".to_string(),
            response_time: None,
            error: Some(e.to_string()),
        },
    }
}

/// GET /health/detailed - Detailed health with all checks
pub async fn health_detailed(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();

    // Overall status stays "ok" without a database; content falls back to memory
    let response = DetailedHealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime: Some(uptime),
        checks: HealthChecks {
            database: database_check().await,
            storage: storage_check(&state).await,
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/database - Database health check
pub async fn health_database() -> impl IntoResponse {
    let check = database_check().await;
    let status = if check.status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, Json(check))
}

/// GET /health/storage - Media storage health check
pub async fn health_storage(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(storage_check(&state).await))
}

/// GET /health/ready - Readiness check
///
/// Ready once media storage is writable and a configured database answers.
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();

    let database = database_check().await.status;
    let storage = storage_check(&state).await.status;
    let storage_ok = storage == "healthy";
    let is_ready = storage_ok && database != "unhealthy";

    let response = ReadyResponse {
        status: if is_ready {
            "ready".to_string()
        } else {
            "not ready".to_string()
        },
        timestamp: Utc::now(),
        uptime: Some(uptime),
        checks: Some(ReadyChecks { database, storage }),
        reason: if !is_ready {
            Some(if !storage_ok {
                "Media storage is not writable".to_string()
            } else {
                "Database is unavailable".to_string()
            })
        } else {
            None
        },
    };

    let status = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_router(storage_root: &std::path::Path) -> Router {
        let config = AppConfig {
            storage_root: storage_root.to_path_buf(),
            ..AppConfig::default()
        };
        Router::new()
            .route("/health", get(health_ping))
            .route("/health/detailed", get(health_detailed))
            .route("/health/database", get(health_database))
            .route("/health/storage", get(health_storage))
            .route("/health/ready", get(health_ready))
            .with_state(AppState::in_memory(config))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value: T = serde_json::from_slice(&body).unwrap();
        (status, value)
    }

    #[test]
    fn test_service_check_has_required_fields() {
        let check = ServiceCheck {
            status: "healthy".to_string(),
            response_time: Some(10),
            error: None,
        };
        let json = serde_json::to_string(&check).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("responseTime"));
    }

    #[tokio::test]
    async fn test_health_ping_returns_ok() {
        init_start_time();
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json::<SimpleHealthResponse>(test_router(dir.path()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_health_storage_is_healthy_for_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json::<ServiceCheck>(test_router(dir.path()), "/health/storage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_database_returns_when_no_pool() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json::<ServiceCheck>(test_router(dir.path()), "/health/database").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "disabled");
    }

    #[tokio::test]
    async fn test_health_detailed_returns_ok() {
        init_start_time();
        let dir = tempfile::tempdir().unwrap();
        let (status, body) =
            get_json::<DetailedHealthResponse>(test_router(dir.path()), "/health/detailed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert!(body.uptime.is_some());
        assert_eq!(body.checks.storage.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_ready_returns_ready() {
        init_start_time();
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json::<ReadyResponse>(test_router(dir.path()), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ready");
    }

    #[tokio::test]
    async fn test_health_ready_reports_unwritable_storage() {
        init_start_time();
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("not-a-dir");
        std::fs::write(&blocked, b"file").unwrap();

        let (status, body) = get_json::<ReadyResponse>(test_router(&blocked), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "not ready");
        assert_eq!(body.checks.unwrap().storage, "unhealthy");
        assert_eq!(body.reason.as_deref(), Some("Media storage is not writable"));
    }
}
