pub mod domain;
pub mod envelope;
pub mod ports;

pub use domain::{
    AccessToken, AuditResult, AuditStats, ContentRequest, GeneratedContent, IgHashtag,
    IgInsightMetric, IgInsightValue, IgMedia, IgProfile, MediaPayload, PublishResult, ReelScript,
    Trend, TrendBundle, TrendType,
};
pub use envelope::ApiResponse;
pub use ports::{
    ContentGenerationService, GraphApiService, PortError, PortResult, FALLBACK_REPLY,
};
