/**
 * Public Site Routes
 * Read-only sections for the marketing site. Each response carries the
 * section data plus the `source` branch that produced it.
 */
use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppError;
use crate::site::{
    self,
    contact::ContactView,
    hero::HeroView,
    layout::LayoutView,
    portfolio::{PortfolioFilter, PortfolioQuery, PortfolioView},
    services::ServiceCard,
    testimonials::TestimonialsView,
    youtube::YoutubeView,
    Section,
};
use crate::state::AppState;

/// GET /api/site/hero
pub async fn hero(State(state): State<AppState>) -> Json<Section<HeroView>> {
    Json(site::hero::render(&state).await)
}

/// GET /api/site/portfolio?main=&sub=
pub async fn portfolio(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<Section<PortfolioView>>, AppError> {
    let filter = PortfolioFilter::parse(&query)?;
    Ok(Json(site::portfolio::render(&state, &filter).await))
}

/// GET /api/site/youtube
pub async fn youtube(State(state): State<AppState>) -> Json<Section<YoutubeView>> {
    Json(site::youtube::render(&state).await)
}

/// GET /api/site/testimonials
pub async fn testimonials(State(state): State<AppState>) -> Json<Section<TestimonialsView>> {
    Json(site::testimonials::render(&state).await)
}

/// GET /api/site/services
pub async fn services(State(state): State<AppState>) -> Json<Section<Vec<ServiceCard>>> {
    Json(site::services::render(&state).await)
}

/// GET /api/site/contact
pub async fn contact(State(state): State<AppState>) -> Json<Section<ContactView>> {
    Json(site::contact::render(&state).await)
}

/// GET /api/site/layout
pub async fn layout(State(state): State<AppState>) -> Json<Section<LayoutView>> {
    Json(site::layout::render(&state).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn site_router() -> Router {
        let state = AppState::in_memory(AppConfig {
            storage_root: std::env::temp_dir().join("studio-site-tests"),
            ..AppConfig::default()
        });
        Router::new()
            .route("/api/site/hero", get(hero))
            .route("/api/site/portfolio", get(portfolio))
            .route("/api/site/services", get(services))
            .route("/api/site/testimonials", get(testimonials))
            .with_state(state)
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = site_router().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_empty_store_serves_fallbacks() {
        let (status, json) = get_json("/api/site/hero").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "fallback_empty");
        assert_eq!(json["data"]["backgroundUrl"], site::hero::FALLBACK_BACKGROUND);

        let (_, json) = get_json("/api/site/services").await;
        assert_eq!(json["source"], "fallback_empty");
        assert_eq!(json["data"].as_array().unwrap().len(), 5);

        let (_, json) = get_json("/api/site/testimonials").await;
        assert_eq!(json["data"]["count"], 3);
    }

    #[tokio::test]
    async fn test_portfolio_sample_filter() {
        let (status, json) = get_json("/api/site/portfolio?main=videography").await;
        assert_eq!(status, StatusCode::OK);
        let items = json["data"]["items"].as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i["type"] == "videography"));
    }

    #[tokio::test]
    async fn test_portfolio_unknown_filter_is_bad_request() {
        let (status, json) = get_json("/api/site/portfolio?main=drone").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("drone"));
    }
}
