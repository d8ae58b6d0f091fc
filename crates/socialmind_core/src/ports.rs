//! crates/socialmind_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the two upstream collaborators:
//! the Graph API and the generative-content provider. The HTTP layer depends
//! only on these traits, so adapters can be swapped or faked in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    AccessToken, AuditResult, AuditStats, ContentRequest, GeneratedContent, IgHashtag,
    IgInsightMetric, IgMedia, IgProfile, MediaPayload, PublishResult, TrendBundle,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A tagged error for all port operations, so callers can tell a rejected
/// credential from a missing object from a dead network.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Upstream call failed: {0}")]
    Upstream(String),
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Shown to the user whenever a reply cannot be generated.
pub const FALLBACK_REPLY: &str = "Thanks for reaching out! We'll get back to you shortly. ✨";

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait GraphApiService: Send + Sync {
    /// Fetches the profile of the account that owns `token`.
    async fn get_profile(&self, token: &AccessToken) -> PortResult<IgProfile>;

    async fn get_media(
        &self,
        token: &AccessToken,
        user_id: &str,
        limit: u32,
    ) -> PortResult<Vec<IgMedia>>;

    async fn get_media_details(&self, token: &AccessToken, media_id: &str)
        -> PortResult<IgMedia>;

    async fn get_user_insights(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> PortResult<Vec<IgInsightMetric>>;

    async fn get_media_insights(
        &self,
        token: &AccessToken,
        media_id: &str,
    ) -> PortResult<Vec<IgInsightMetric>>;

    async fn search_hashtags(&self, token: &AccessToken, term: &str)
        -> PortResult<Vec<IgHashtag>>;

    async fn publish_media(
        &self,
        token: &AccessToken,
        user_id: &str,
        payload: &MediaPayload,
    ) -> PortResult<PublishResult>;

    /// Creates a media container with `scheduled_publish_time` set to
    /// `publish_at` in Unix seconds. Past times are passed through unchanged.
    async fn schedule_post(
        &self,
        token: &AccessToken,
        user_id: &str,
        image_url: &str,
        caption: &str,
        publish_at: DateTime<Utc>,
    ) -> PortResult<PublishResult>;

    /// Liveness check for `token`. Every failure collapses to `false`.
    async fn verify_token(&self, token: &AccessToken) -> bool;
}

#[async_trait]
pub trait ContentGenerationService: Send + Sync {
    /// Generates a caption, hashtags, a reel script and a posting time.
    async fn generate_content(&self, request: &ContentRequest) -> PortResult<GeneratedContent>;

    /// Generates a short reply to an incoming message. Never fails and never
    /// returns an empty string; falls back to [`FALLBACK_REPLY`].
    async fn generate_reply(&self, context: &str, incoming_message: &str) -> String;

    async fn generate_audit(&self, stats: &AuditStats) -> PortResult<AuditResult>;

    async fn analyze_trends(&self, niche: &str) -> PortResult<TrendBundle>;
}
