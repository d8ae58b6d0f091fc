//! crates/socialmind_client/src/client.rs
//!
//! The dashboard's typed view of the API. Every call unwraps the Envelope and
//! turns any failure into `None`, so UI code only branches on presence.

use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use socialmind_core::{
    domain::{
        AccessToken, AuditResult, AuditStats, ContentRequest, GeneratedContent, IgHashtag,
        IgInsightMetric, IgMedia, IgProfile, PublishResult, TrendBundle,
    },
    ApiResponse, FALLBACK_REPLY,
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::credentials::CredentialStore;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, thiserror::Error)]
enum ClientError {
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server reported: {0}")]
    Rejected(String),
    #[error("response carried no data")]
    Empty,
}

//=========================================================================================
// Request Bodies
//=========================================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPost {
    pub user_id: String,
    pub image_url: String,
    pub caption: String,
    pub user_tags: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePost {
    pub user_id: String,
    pub image_url: String,
    pub caption: String,
    /// ISO 8601, e.g. `2025-01-01T09:00:00Z`.
    pub scheduled_time: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    context: &'a str,
    incoming_message: &'a str,
}

#[derive(Deserialize)]
struct ReplyResponse {
    reply: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
}

//=========================================================================================
// The Client
//=========================================================================================

#[derive(Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, credentials)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Stores the token attached to every following request.
    pub fn login(&self, token: impl Into<String>) {
        self.credentials.store(AccessToken::new(token));
    }

    pub fn logout(&self) {
        self.credentials.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.load().is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::Endpoint(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Endpoint(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.get(self.endpoint(segments)?))
    }

    fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.post(self.endpoint(segments)?).json(body))
    }

    /// Attaches the stored credential, sends, and unwraps the Envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        request: Result<RequestBuilder, ClientError>,
    ) -> Result<T, ClientError> {
        let mut request = request?;
        if let Some(token) = self.credentials.load() {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await?;
        debug!("API responded with {}", response.status());

        let envelope: ApiResponse<T> = response.json().await?;
        if envelope.success {
            envelope.data.ok_or(ClientError::Empty)
        } else {
            Err(ClientError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        action: &str,
        request: Result<RequestBuilder, ClientError>,
    ) -> Option<T> {
        match self.call(request).await {
            Ok(data) => Some(data),
            Err(e) => {
                error!("{} failed: {}", action, e);
                None
            }
        }
    }

    //-------------------------------------------------------------------------------------
    // Content
    //-------------------------------------------------------------------------------------

    pub async fn generate_instagram_content(
        &self,
        request: &ContentRequest,
    ) -> Option<GeneratedContent> {
        self.fetch(
            "Content generation",
            self.post(&["content", "generate"], request),
        )
        .await
    }

    pub async fn get_trending_trends(&self, niche: &str) -> Option<TrendBundle> {
        let body = serde_json::json!({ "niche": niche });
        self.fetch("Trend hunting", self.post(&["trends", "analyze"], &body))
            .await
    }

    /// Always returns printable text: the trimmed reply, or the fallback.
    pub async fn generate_ai_reply(&self, context: &str, incoming_message: &str) -> String {
        let body = ReplyRequest {
            context,
            incoming_message,
        };
        self.fetch::<ReplyResponse>("AI reply generation", self.post(&["ai", "reply"], &body))
            .await
            .map(|r| r.reply.trim().to_string())
            .filter(|reply| !reply.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }

    pub async fn generate_full_audit(&self, stats: &AuditStats) -> Option<AuditResult> {
        self.fetch(
            "Audit generation",
            self.post(&["analytics", "audit"], stats),
        )
        .await
    }

    //-------------------------------------------------------------------------------------
    // Graph API
    //-------------------------------------------------------------------------------------

    pub async fn get_instagram_profile(&self, user_id: &str) -> Option<IgProfile> {
        self.fetch(
            "Fetching profile",
            self.get(&["instagram", "profile", user_id]),
        )
        .await
    }

    pub async fn get_instagram_insights(&self, user_id: &str) -> Option<Vec<IgInsightMetric>> {
        self.fetch(
            "Fetching insights",
            self.get(&["instagram", "insights", user_id]),
        )
        .await
    }

    pub async fn get_instagram_media(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Option<Vec<IgMedia>> {
        let request = self.get(&["instagram", "media", user_id]).map(|r| match limit {
            Some(limit) => r.query(&[("limit", limit)]),
            None => r,
        });
        self.fetch("Fetching media", request).await
    }

    pub async fn publish_instagram_post(&self, post: &PublishPost) -> Option<PublishResult> {
        self.fetch(
            "Publishing post",
            self.post(&["instagram", "publish"], post),
        )
        .await
    }

    pub async fn schedule_instagram_post(&self, post: &SchedulePost) -> Option<PublishResult> {
        self.fetch(
            "Scheduling post",
            self.post(&["instagram", "schedule"], post),
        )
        .await
    }

    pub async fn search_hashtags(&self, term: &str) -> Option<Vec<IgHashtag>> {
        let request = self
            .get(&["instagram", "hashtags"])
            .map(|r| r.query(&[("search", term)]));
        self.fetch("Hashtag search", request).await
    }

    pub async fn verify_token(&self) -> bool {
        self.fetch::<VerifyResponse>("Token verification", self.get(&["instagram", "verify"]))
            .await
            .is_some_and(|r| r.valid)
    }
}
