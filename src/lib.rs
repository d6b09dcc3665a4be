//! Studio Backend - content API and admin console for a photography and
//! videography studio site.

pub mod admin;
pub mod cache;
pub mod config;
pub mod contact;
pub mod content;
pub mod db;
pub mod error;
pub mod logging;
pub mod media;
pub mod routes;
pub mod session;
pub mod site;
pub mod state;
pub mod storage;
pub mod store;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to the local dev servers.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://localhost:5173"),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

fn admin_routes() -> Router<AppState> {
    use routes::admin::*;

    Router::new()
        .route("/portfolio", get(list_portfolio).post(create_portfolio))
        .route("/portfolio/{id}", delete(delete_portfolio))
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/reviews/{id}/approval", post(toggle_review_approval))
        .route("/reviews/{id}", delete(delete_review))
        .route("/settings", get(get_settings).put(save_settings))
        .route("/settings/videos", post(add_video))
        .route("/settings/videos/{id}", delete(remove_video))
        .route("/settings/services", post(add_service))
        .route("/settings/services/{name}", delete(remove_service))
        .route("/hero", get(get_hero).put(save_hero))
        .route("/hero/upload", post(upload_hero_media))
}

fn site_routes() -> Router<AppState> {
    use routes::site::*;

    Router::new()
        .route("/hero", get(hero))
        .route("/portfolio", get(portfolio))
        .route("/youtube", get(youtube))
        .route("/testimonials", get(testimonials))
        .route("/services", get(services))
        .route("/contact", get(contact))
        .route("/layout", get(layout))
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors();
    let max_upload_bytes = state.config.max_upload_bytes;
    let storage = ServeDir::new(&state.config.storage_root);

    Router::new()
        .route("/api/logs", post(routes::logs::receive_client_logs))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/verify", post(routes::auth::verify_token))
        .route("/api/auth/logout", post(routes::auth::logout))
        .nest("/api/admin", admin_routes())
        .nest("/api/site", site_routes())
        .route("/api/media/embed", get(routes::media::embed))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/database", get(routes::health::health_database))
        .route("/health/storage", get(routes::health::health_storage))
        .route("/health/ready", get(routes::health::health_ready))
        .nest_service("/storage", storage)
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Multipart uploads are buffered, so one cap covers extractors and raw bodies.
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(cors)
}

/// Build state on Postgres when DATABASE_URL is set, in memory otherwise.
async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    if std::env::var("DATABASE_URL").is_err() {
        tracing::warn!("DATABASE_URL not set. Content is kept in memory and lost on restart.");
        return Ok(AppState::in_memory(config));
    }

    let pool = db::init_pool(None)
        .await
        .context("failed to initialize database pool")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(AppState::with_pool(config, pool.as_ref().clone()))
}

/// Run the server (used by main).
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::default();

    // Held for the process lifetime; dropping them loses buffered log lines.
    let _log_guards = logging::init(&config.environment);

    routes::health::init_start_time();

    config
        .check_production()
        .map_err(|msg| anyhow::anyhow!("refusing to start: {}", msg))?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid HOST/PORT configuration")?;

    let state = build_state(config).await?;
    if let Err(e) = state.media.health_check().await {
        tracing::warn!("Media storage is not writable: {}", e);
    }

    let app = create_app(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app_returns_router() {
        let state = AppState::in_memory(AppConfig::default());
        let _app = create_app(state);
    }
}
