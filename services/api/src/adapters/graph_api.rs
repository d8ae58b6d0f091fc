//! services/api/src/adapters/graph_api.rs
//!
//! This module contains the adapter for the Instagram Graph API.
//! It implements the `GraphApiService` port from the `core` crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use socialmind_core::{
    domain::{
        AccessToken, IgHashtag, IgInsightMetric, IgMedia, IgProfile, MediaPayload, PublishResult,
    },
    ports::{GraphApiService, PortError, PortResult},
};
use tracing::{debug, error};

const PROFILE_FIELDS: &str =
    "id,username,name,biography,profile_picture_url,followers_count,follows_count,media_count";
const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,timestamp,like_count,comments_count";
const MEDIA_INSIGHT_METRICS: &str = "engagement,impressions,reach,saved,likes,comments";
const USER_INSIGHT_METRICS: &str =
    "impressions,reach,follower_count,profile_views,phone_clicks,text_message_clicks";

/// Graph API error code for an invalid or expired access token.
const OAUTH_INVALID_TOKEN: i64 = 190;

//=========================================================================================
// Wire Records
//=========================================================================================

/// The `{ "data": [...] }` wrapper used by every Graph API collection edge.
#[derive(Deserialize)]
struct DataPage<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct TokenProbe {
    id: Option<String>,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Deserialize)]
struct GraphErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<i64>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `GraphApiService` over HTTP.
#[derive(Clone)]
pub struct GraphApiAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl GraphApiAdapter {
    /// Creates a new `GraphApiAdapter` rooted at `base_url` (no trailing slash).
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<R: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        params: &[(&str, String)],
    ) -> PortResult<R> {
        debug!("GET {}", path);
        let request = self
            .http
            .get(self.url(path))
            .query(params)
            .query(&[("access_token", token.as_str())]);
        Self::send(request).await
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        body: &B,
    ) -> PortResult<R> {
        debug!("POST {}", path);
        let request = self
            .http
            .post(self.url(path))
            .query(&[("access_token", token.as_str())])
            .json(body);
        Self::send(request).await
    }

    async fn send<R: DeserializeOwned>(request: RequestBuilder) -> PortResult<R> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| PortError::Malformed(e.to_string()))
    }
}

/// Maps a non-success Graph API response onto a `PortError` kind.
fn classify_failure(status: StatusCode, body: &str) -> PortError {
    let detail = serde_json::from_str::<GraphErrorBody>(body).ok().map(|b| b.error);

    let message = match &detail {
        Some(GraphErrorDetail {
            message: Some(message),
            error_type,
            ..
        }) => match error_type {
            Some(kind) => format!("{} ({}): {}", status, kind, message),
            None => format!("{}: {}", status, message),
        },
        _ => format!("{}: {}", status, body),
    };

    let invalid_token = detail.as_ref().and_then(|d| d.code) == Some(OAUTH_INVALID_TOKEN);

    if invalid_token || status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        PortError::Unauthorized(message)
    } else if status == StatusCode::NOT_FOUND {
        PortError::NotFound(message)
    } else {
        PortError::Upstream(message)
    }
}

//=========================================================================================
// `GraphApiService` Trait Implementation
//=========================================================================================

#[async_trait]
impl GraphApiService for GraphApiAdapter {
    async fn get_profile(&self, token: &AccessToken) -> PortResult<IgProfile> {
        self.get(token, "me", &[("fields", PROFILE_FIELDS.to_string())])
            .await
            .inspect_err(|e| error!("Failed to fetch user profile: {}", e))
    }

    async fn get_media(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: u32,
    ) -> PortResult<Vec<IgMedia>> {
        let params = [
            ("fields", MEDIA_FIELDS.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get::<DataPage<IgMedia>>(token, &format!("{}/media", user_id), &params)
            .await
            .map(|page| page.data)
            .inspect_err(|e| error!("Failed to fetch media for {}: {}", user_id, e))
    }

    async fn get_media_details(
        &self,
        token: &AccessToken,
        media_id: &str,
    ) -> PortResult<IgMedia> {
        self.get(token, media_id, &[("fields", MEDIA_FIELDS.to_string())])
            .await
            .inspect_err(|e| error!("Failed to fetch media details for {}: {}", media_id, e))
    }

    async fn get_user_insights(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> PortResult<Vec<IgInsightMetric>> {
        let params = [
            ("metric", USER_INSIGHT_METRICS.to_string()),
            ("period", "day".to_string()),
        ];
        self.get::<DataPage<IgInsightMetric>>(token, &format!("{}/insights", user_id), &params)
            .await
            .map(|page| page.data)
            .inspect_err(|e| error!("Failed to fetch user insights for {}: {}", user_id, e))
    }

    async fn get_media_insights(
        &self,
        token: &AccessToken,
        media_id: &str,
    ) -> PortResult<Vec<IgInsightMetric>> {
        let params = [("metric", MEDIA_INSIGHT_METRICS.to_string())];
        self.get::<DataPage<IgInsightMetric>>(token, &format!("{}/insights", media_id), &params)
            .await
            .map(|page| page.data)
            .inspect_err(|e| error!("Failed to fetch media insights for {}: {}", media_id, e))
    }

    async fn search_hashtags(
        &self,
        token: &AccessToken,
        term: &str,
    ) -> PortResult<Vec<IgHashtag>> {
        // NOTE: the search is always issued for `me`, not the caller's user id.
        let params = [
            ("user_id", "me".to_string()),
            ("fields", "id,name".to_string()),
            ("search_string", term.to_string()),
        ];
        self.get::<DataPage<IgHashtag>>(token, "ig_hashtag_search", &params)
            .await
            .map(|page| page.data)
            .inspect_err(|e| error!("Failed to search hashtags: {}", e))
    }

    async fn publish_media(
        &self,
        token: &AccessToken,
        user_id: &str,
        payload: &MediaPayload,
    ) -> PortResult<PublishResult> {
        self.post(token, &format!("{}/media", user_id), payload)
            .await
            .inspect_err(|e| error!("Failed to publish media for {}: {}", user_id, e))
    }

    async fn schedule_post(
        &self,
        token: &AccessToken,
        user_id: &str,
        image_url: &str,
        caption: &str,
        publish_at: DateTime<Utc>,
    ) -> PortResult<PublishResult> {
        let payload = MediaPayload {
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            user_tags: Vec::new(),
            scheduled_publish_time: Some(publish_at.timestamp()),
        };
        self.post(token, &format!("{}/media", user_id), &payload)
            .await
            .inspect_err(|e| error!("Failed to schedule post for {}: {}", user_id, e))
    }

    async fn verify_token(&self, token: &AccessToken) -> bool {
        match self
            .get::<TokenProbe>(token, "me", &[("fields", "id".to_string())])
            .await
        {
            Ok(probe) => probe.id.is_some_and(|id| !id.is_empty()),
            Err(e) => {
                error!("Token verification failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_code_190_is_unauthorized_even_on_400() {
        let body = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190}}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, PortError::Unauthorized(msg) if msg.contains("OAuthException")));
    }

    #[test]
    fn not_found_is_distinguished_from_other_failures() {
        let err = classify_failure(StatusCode::NOT_FOUND, "{}");
        assert!(matches!(err, PortError::NotFound(_)));

        let err = classify_failure(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert!(matches!(err, PortError::Upstream(msg) if msg.contains("upstream exploded")));
    }

    #[test]
    fn forbidden_is_unauthorized() {
        let err = classify_failure(StatusCode::FORBIDDEN, "");
        assert!(matches!(err, PortError::Unauthorized(_)));
    }
}
