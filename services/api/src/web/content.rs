//! services/api/src/web/content.rs
//!
//! Handlers backed by the content generation provider: captions and scripts,
//! conversational replies, and account audits.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use socialmind_core::{
    domain::{AuditResult, AuditStats, ContentRequest, GeneratedContent},
    ports::FALLBACK_REPLY,
    ApiResponse,
};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    web::{
        extract::{ApiJson, FieldCheck},
        state::AppState,
    },
};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct GenerateContentBody {
    pub topic: Option<String>,
    pub target: Option<String>,
    pub tone: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    pub context: Option<String>,
    pub incoming_message: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReplyResponse {
    pub reply: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/content/generate - Generate a caption, hashtags and a reel script
#[utoipa::path(
    post,
    path = "/api/content/generate",
    request_body = GenerateContentBody,
    responses(
        (status = 200, description = "Generated content in the envelope", body = GeneratedContent),
        (status = 400, description = "Missing topic, target or tone"),
        (status = 500, description = "Provider not configured or generation failed")
    )
)]
pub async fn generate_content_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<GenerateContentBody>,
) -> Result<Json<ApiResponse<GeneratedContent>>, ApiError> {
    let mut check = FieldCheck::default();
    let request = ContentRequest {
        topic: check.text("topic", body.topic),
        target: check.text("target", body.target),
        tone: check.text("tone", body.tone),
    };
    check.finish()?;

    let content = state.content()?;
    info!("Generating content for topic '{}'", request.topic);

    let generated = content.generate_content(&request).await.map_err(|_| {
        ApiError::upstream(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate content")
    })?;

    Ok(Json(ApiResponse::success(generated)))
}

/// POST /api/ai/reply - Draft a short reply to an incoming message
///
/// Always succeeds once validated; a fallback reply is used when the provider
/// is unavailable.
#[utoipa::path(
    post,
    path = "/api/ai/reply",
    request_body = ReplyBody,
    responses(
        (status = 200, description = "Reply text in the envelope", body = ReplyResponse),
        (status = 400, description = "Missing context or incomingMessage")
    )
)]
pub async fn ai_reply_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ReplyBody>,
) -> Result<Json<ApiResponse<ReplyResponse>>, ApiError> {
    let mut check = FieldCheck::default();
    let context = check.text("context", body.context);
    let incoming_message = check.text("incomingMessage", body.incoming_message);
    check.finish()?;

    let reply = match &state.content {
        Some(content) => content.generate_reply(&context, &incoming_message).await,
        None => {
            warn!("AI reply requested without a configured provider, using fallback");
            FALLBACK_REPLY.to_string()
        }
    };

    Ok(Json(ApiResponse::success(ReplyResponse { reply })))
}

/// POST /api/analytics/audit - Audit an account from its weekly metrics
#[utoipa::path(
    post,
    path = "/api/analytics/audit",
    request_body = AuditStats,
    responses(
        (status = 200, description = "Audit in the envelope", body = AuditResult),
        (status = 400, description = "A metric is missing"),
        (status = 500, description = "Provider not configured or generation failed")
    )
)]
pub async fn audit_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(stats): ApiJson<AuditStats>,
) -> Result<Json<ApiResponse<AuditResult>>, ApiError> {
    let mut check = FieldCheck::default();
    check.value("followers", &stats.followers);
    check.value("reach", &stats.reach);
    check.value("impressions", &stats.impressions);
    check.value("engagement", &stats.engagement);
    check.value("likes", &stats.likes);
    check.finish()?;

    let content = state.content()?;
    let audit = content.generate_audit(&stats).await.map_err(|_| {
        ApiError::upstream(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate audit")
    })?;

    Ok(Json(ApiResponse::success(audit)))
}
