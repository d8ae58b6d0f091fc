//! services/api/src/web/trends.rs
//!
//! The trend hunter endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use socialmind_core::{domain::TrendBundle, ApiResponse};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    web::{
        extract::{ApiJson, FieldCheck},
        state::AppState,
    },
};

#[derive(Deserialize, ToSchema)]
pub struct TrendQuery {
    pub niche: Option<String>,
}

/// POST /api/trends/analyze - Find viral formats and hashtags for a niche
///
/// The prompt asks for 3 trends and 10 hashtags; the provider's counts are
/// passed through untrimmed.
#[utoipa::path(
    post,
    path = "/api/trends/analyze",
    request_body = TrendQuery,
    responses(
        (status = 200, description = "Trend bundle in the envelope", body = TrendBundle),
        (status = 400, description = "Missing niche"),
        (status = 500, description = "Provider not configured or analysis failed")
    )
)]
pub async fn analyze_trends_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(query): ApiJson<TrendQuery>,
) -> Result<Json<ApiResponse<TrendBundle>>, ApiError> {
    let mut check = FieldCheck::default();
    let niche = check.text("niche", query.niche);
    check.finish()?;

    let content = state.content()?;
    info!("Analyzing trends for niche '{}'", niche);

    let bundle = content.analyze_trends(&niche).await.map_err(|_| {
        ApiError::upstream(StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze trends")
    })?;

    Ok(Json(ApiResponse::success(bundle)))
}
