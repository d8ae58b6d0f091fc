//! crates/socialmind_core/src/domain.rs
//!
//! Defines the request and response shapes shared by the API service and the
//! dashboard client. Nothing here is persisted; every value lives for one
//! request/response cycle.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

//=========================================================================================
// Credentials
//=========================================================================================

/// An opaque Graph API bearer token, supplied per request.
///
/// `Debug` is redacted so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

//=========================================================================================
// Generated Content
//=========================================================================================

/// Inputs to caption and reel-script generation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentRequest {
    pub topic: String,
    pub target: String,
    pub tone: String,
}

/// A three-part short video script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReelScript {
    pub hook: String,
    pub body: String,
    pub cta: String,
}

/// The structured output of a content generation request.
///
/// Every field is required when decoding, so a partially populated value
/// can never be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub caption: String,
    /// Ordered by relevance.
    pub hashtags: Vec<String>,
    pub reel_script: ReelScript,
    pub best_posting_time: String,
}

//=========================================================================================
// Trends
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TrendType {
    #[serde(rename = "Reel Format")]
    ReelFormat,
    #[serde(rename = "Hashtag Trend")]
    HashtagTrend,
    #[serde(rename = "Video Format")]
    VideoFormat,
    #[serde(rename = "Content Style")]
    ContentStyle,
}

impl TrendType {
    pub const ALL: [TrendType; 4] = [
        TrendType::ReelFormat,
        TrendType::HashtagTrend,
        TrendType::VideoFormat,
        TrendType::ContentStyle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrendType::ReelFormat => "Reel Format",
            TrendType::HashtagTrend => "Hashtag Trend",
            TrendType::VideoFormat => "Video Format",
            TrendType::ContentStyle => "Content Style",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub title: String,
    #[serde(rename = "type")]
    pub trend_type: TrendType,
    /// Percentage-like, e.g. "92%".
    pub viral_score: String,
    pub audio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendBundle {
    pub trends: Vec<Trend>,
    pub global_hashtags: Vec<String>,
}

//=========================================================================================
// Account Audit
//=========================================================================================

/// Weekly account metrics fed into an audit. Values are passed to the prompt
/// as-is, so numbers and strings like "4.2%" are both accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AuditStats {
    pub followers: Option<Value>,
    pub reach: Option<Value>,
    pub impressions: Option<Value>,
    pub engagement: Option<Value>,
    pub likes: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditResult {
    /// Health score between 0 and 100.
    pub score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

//=========================================================================================
// Graph API Pass-through Shapes
//=========================================================================================
// Field names mirror the upstream API; nothing is renamed or transformed.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IgProfile {
    pub id: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follows_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IgMedia {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u64>,
}

/// One metric series from an `/insights` edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IgInsightMetric {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub values: Vec<IgInsightValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IgInsightValue {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IgHashtag {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The body posted to `/{user_id}/media` when creating a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaPayload {
    pub image_url: String,
    pub caption: String,
    #[serde(default)]
    pub user_tags: Vec<Value>,
    /// Unix seconds; only set for scheduled posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_publish_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublishResult {
    pub id: String,
}
