pub mod content;
pub mod extract;
pub mod instagram;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod trends;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::ConfigError, error::ApiError};

pub use middleware::require_bearer;
pub use rest::ApiDoc;
pub use state::AppState;

const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Builds the complete application: API routes, middleware stack and Swagger UI.
pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let origin = app_state
        .config
        .frontend_url
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue("FRONTEND_URL".to_string(), e.to_string()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Graph API routes (bearer token required)
    let instagram_routes = Router::new()
        .route("/profile/{user_id}", get(instagram::profile_handler))
        .route("/insights/{user_id}", get(instagram::insights_handler))
        .route("/media/{id}", get(instagram::media_handler))
        .route("/media/{id}/details", get(instagram::media_details_handler))
        .route("/media/{id}/insights", get(instagram::media_insights_handler))
        .route("/publish", post(instagram::publish_handler))
        .route("/schedule", post(instagram::schedule_handler))
        .route("/hashtags", get(instagram::hashtags_handler))
        .route("/verify", get(instagram::verify_handler))
        .route_layer(axum_middleware::from_fn(require_bearer));

    let api_router = Router::new()
        .route("/health", get(rest::health_handler))
        .route("/api/content/generate", post(content::generate_content_handler))
        .route("/api/ai/reply", post(content::ai_reply_handler))
        .route("/api/analytics/audit", post(content::audit_handler))
        .route("/api/trends/analyze", post(trends::analyze_trends_handler))
        .nest("/api/instagram", instagram_routes)
        .fallback(rest::not_found_handler)
        .with_state(app_state);

    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(rest::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}
