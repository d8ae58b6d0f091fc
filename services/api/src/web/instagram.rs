//! services/api/src/web/instagram.rs
//!
//! Graph API proxy endpoints. Every route here sits behind `require_bearer`,
//! so handlers can rely on an `AccessToken` extension being present.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use socialmind_core::{
    domain::{
        AccessToken, IgHashtag, IgInsightMetric, IgMedia, IgProfile, MediaPayload, PublishResult,
    },
    ports::PortError,
    ApiResponse,
};
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    web::{
        extract::{ApiJson, FieldCheck},
        state::AppState,
    },
};

pub const DEFAULT_MEDIA_LIMIT: u32 = 25;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MediaQuery {
    /// Page size; absent, non-numeric or zero means 25.
    pub limit: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HashtagQuery {
    pub search: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishBody {
    pub user_id: Option<String>,
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub user_tags: Option<Vec<Value>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBody {
    pub user_id: Option<String>,
    pub image_url: Option<String>,
    pub caption: Option<String>,
    /// ISO 8601 date or date-time; values without an offset are read as UTC.
    pub scheduled_time: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
}

//=========================================================================================
// Helpers
//=========================================================================================

/// Translates a Graph API failure into the status this façade reports for it.
fn graph_failure(err: PortError, action: &str) -> ApiError {
    match err {
        PortError::Unauthorized(_) => {
            ApiError::Unauthorized(format!("Failed to {}: access token rejected", action))
        }
        PortError::NotFound(_) => {
            ApiError::upstream(StatusCode::NOT_FOUND, format!("Failed to {}: not found", action))
        }
        _ => ApiError::upstream(StatusCode::BAD_REQUEST, format!("Failed to {}", action)),
    }
}

/// Graph object ids are interpolated into upstream paths, so they must be a
/// single plain segment.
fn check_id(name: &str, id: &str) -> Result<(), ApiError> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(|c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace());
    if invalid {
        Err(ApiError::Validation(format!("Invalid {}", name)))
    } else {
        Ok(())
    }
}

fn media_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MEDIA_LIMIT)
}

/// Parses a schedule time. Accepts RFC 3339, a naive date-time (UTC) or a
/// bare date (UTC midnight).
pub fn parse_schedule_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /api/instagram/profile/{user_id} - Profile of the token's account
#[utoipa::path(
    get,
    path = "/api/instagram/profile/{user_id}",
    params(("user_id" = String, Path, description = "Graph API user id")),
    responses(
        (status = 200, description = "Profile in the envelope", body = IgProfile),
        (status = 400, description = "Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<IgProfile>>, ApiError> {
    check_id("userId", &user_id)?;
    let profile = state
        .graph
        .get_profile(&token)
        .await
        .map_err(|e| graph_failure(e, "fetch profile"))?;
    Ok(Json(ApiResponse::success(profile)))
}

/// GET /api/instagram/insights/{user_id} - Daily account insights
#[utoipa::path(
    get,
    path = "/api/instagram/insights/{user_id}",
    params(("user_id" = String, Path, description = "Graph API user id")),
    responses(
        (status = 200, description = "Insight metrics in the envelope", body = [IgInsightMetric]),
        (status = 400, description = "Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn insights_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<IgInsightMetric>>>, ApiError> {
    check_id("userId", &user_id)?;
    let insights = state
        .graph
        .get_user_insights(&token, &user_id)
        .await
        .map_err(|e| graph_failure(e, "fetch insights"))?;
    Ok(Json(ApiResponse::success(insights)))
}

/// GET /api/instagram/media/{id} - Recent media of a user
#[utoipa::path(
    get,
    path = "/api/instagram/media/{id}",
    params(("id" = String, Path, description = "Graph API user id"), MediaQuery),
    responses(
        (status = 200, description = "Media list in the envelope", body = [IgMedia]),
        (status = 400, description = "Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn media_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Path(user_id): Path<String>,
    Query(query): Query<MediaQuery>,
) -> Result<Json<ApiResponse<Vec<IgMedia>>>, ApiError> {
    check_id("userId", &user_id)?;
    let limit = media_limit(query.limit.as_deref());
    let media = state
        .graph
        .get_media(&token, &user_id, limit)
        .await
        .map_err(|e| graph_failure(e, "fetch media"))?;
    Ok(Json(ApiResponse::success(media)))
}

/// GET /api/instagram/media/{id}/details - Metadata of one media item
#[utoipa::path(
    get,
    path = "/api/instagram/media/{id}/details",
    params(("id" = String, Path, description = "Graph API media id")),
    responses(
        (status = 200, description = "Media item in the envelope", body = IgMedia),
        (status = 404, description = "No such media"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn media_details_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Path(media_id): Path<String>,
) -> Result<Json<ApiResponse<IgMedia>>, ApiError> {
    check_id("mediaId", &media_id)?;
    let media = state
        .graph
        .get_media_details(&token, &media_id)
        .await
        .map_err(|e| graph_failure(e, "fetch media details"))?;
    Ok(Json(ApiResponse::success(media)))
}

/// GET /api/instagram/media/{id}/insights - Engagement metrics of one media item
#[utoipa::path(
    get,
    path = "/api/instagram/media/{id}/insights",
    params(("id" = String, Path, description = "Graph API media id")),
    responses(
        (status = 200, description = "Insight metrics in the envelope", body = [IgInsightMetric]),
        (status = 400, description = "Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn media_insights_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Path(media_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<IgInsightMetric>>>, ApiError> {
    check_id("mediaId", &media_id)?;
    let insights = state
        .graph
        .get_media_insights(&token, &media_id)
        .await
        .map_err(|e| graph_failure(e, "fetch media insights"))?;
    Ok(Json(ApiResponse::success(insights)))
}

/// POST /api/instagram/publish - Create a media container
#[utoipa::path(
    post,
    path = "/api/instagram/publish",
    request_body = PublishBody,
    responses(
        (status = 200, description = "Container id in the envelope", body = PublishResult),
        (status = 400, description = "Missing fields or Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn publish_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    ApiJson(body): ApiJson<PublishBody>,
) -> Result<Json<ApiResponse<PublishResult>>, ApiError> {
    let mut check = FieldCheck::default();
    let user_id = check.text("userId", body.user_id);
    let image_url = check.text("imageUrl", body.image_url);
    let caption = check.text("caption", body.caption);
    check.finish()?;
    check_id("userId", &user_id)?;

    let payload = MediaPayload {
        image_url,
        caption,
        user_tags: body.user_tags.unwrap_or_default(),
        scheduled_publish_time: None,
    };

    info!("Publishing media for user {}", user_id);
    let result = state
        .graph
        .publish_media(&token, &user_id, &payload)
        .await
        .map_err(|e| graph_failure(e, "publish media"))?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /api/instagram/schedule - Create a container with a publish time
///
/// The time is not checked against the clock; past times go upstream as-is.
#[utoipa::path(
    post,
    path = "/api/instagram/schedule",
    request_body = ScheduleBody,
    responses(
        (status = 200, description = "Container id in the envelope", body = PublishResult),
        (status = 400, description = "Missing fields, bad time, or Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn schedule_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    ApiJson(body): ApiJson<ScheduleBody>,
) -> Result<Json<ApiResponse<PublishResult>>, ApiError> {
    let mut check = FieldCheck::default();
    let user_id = check.text("userId", body.user_id);
    let image_url = check.text("imageUrl", body.image_url);
    let caption = check.text("caption", body.caption);
    let scheduled_time = check.text("scheduledTime", body.scheduled_time);
    check.finish()?;
    check_id("userId", &user_id)?;

    let publish_at = parse_schedule_time(&scheduled_time)
        .ok_or_else(|| ApiError::Validation("Invalid scheduledTime".to_string()))?;

    info!("Scheduling post for user {} at {}", user_id, publish_at);
    let result = state
        .graph
        .schedule_post(&token, &user_id, &image_url, &caption, publish_at)
        .await
        .map_err(|e| graph_failure(e, "schedule post"))?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /api/instagram/hashtags?search= - Look up hashtag ids
#[utoipa::path(
    get,
    path = "/api/instagram/hashtags",
    params(HashtagQuery),
    responses(
        (status = 200, description = "Hashtags in the envelope", body = [IgHashtag]),
        (status = 400, description = "Missing search term or Graph API call failed"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn hashtags_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<HashtagQuery>,
) -> Result<Json<ApiResponse<Vec<IgHashtag>>>, ApiError> {
    let mut check = FieldCheck::default();
    let search = check.text("search", query.search);
    check.finish()?;

    let hashtags = state
        .graph
        .search_hashtags(&token, &search)
        .await
        .map_err(|e| graph_failure(e, "search hashtags"))?;
    Ok(Json(ApiResponse::success(hashtags)))
}

/// GET /api/instagram/verify - Check whether the bearer token is still live
#[utoipa::path(
    get,
    path = "/api/instagram/verify",
    responses(
        (status = 200, description = "Liveness in the envelope", body = VerifyResponse),
        (status = 401, description = "Missing bearer token")
    ),
    security(("bearer" = []))
)]
pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<AccessToken>,
) -> Json<ApiResponse<VerifyResponse>> {
    let valid = state.graph.verify_token(&token).await;
    Json(ApiResponse::success(VerifyResponse { valid }))
}
