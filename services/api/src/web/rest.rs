//! services/api/src/web/rest.rs
//!
//! Contains the service-level handlers (health, fallback, panic recovery) and the
//! master definition for the OpenAPI specification.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use socialmind_core::{
    domain::{
        AuditResult, AuditStats, GeneratedContent, IgHashtag, IgInsightMetric, IgInsightValue,
        IgMedia, IgProfile, PublishResult, ReelScript, Trend, TrendBundle, TrendType,
    },
    ApiResponse,
};
use std::any::Any;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

use crate::{
    error::ApiError,
    web::{content, instagram, trends},
};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        content::generate_content_handler,
        content::ai_reply_handler,
        content::audit_handler,
        trends::analyze_trends_handler,
        instagram::profile_handler,
        instagram::insights_handler,
        instagram::media_handler,
        instagram::media_details_handler,
        instagram::media_insights_handler,
        instagram::publish_handler,
        instagram::schedule_handler,
        instagram::hashtags_handler,
        instagram::verify_handler,
    ),
    components(
        schemas(
            HealthStatus,
            content::GenerateContentBody, content::ReplyBody, content::ReplyResponse,
            trends::TrendQuery,
            instagram::PublishBody, instagram::ScheduleBody, instagram::VerifyResponse,
            GeneratedContent, ReelScript, TrendBundle, Trend, TrendType,
            AuditStats, AuditResult,
            IgProfile, IgMedia, IgInsightMetric, IgInsightValue, IgHashtag, PublishResult
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "SocialMind API", description = "Graph API proxy and AI content generation for the social dashboard.")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

//=========================================================================================
// API Response Structs
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /health - Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is up", body = HealthStatus))
)]
pub async fn health_handler() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "Server is running".to_string(),
        timestamp: Utc::now(),
    }))
}

/// Answers every unmatched path.
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Route not found")),
    )
}

/// Turns a handler panic into a generic 500 Envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
