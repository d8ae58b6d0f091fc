//! services/api/src/adapters/schemas.rs
//!
//! JSON schemas and prompts for each structured generation capability. The
//! provider enforces the schema, so the adapter only has to decode the result.

use serde_json::{json, Value};
use socialmind_core::domain::{AuditStats, ContentRequest, TrendType};

pub const CONTENT_SCHEMA_NAME: &str = "instagram_content";
pub const AUDIT_SCHEMA_NAME: &str = "account_audit";
pub const TRENDS_SCHEMA_NAME: &str = "trend_bundle";

pub const REPLY_SYSTEM_INSTRUCTIONS: &str = "You are an AI Social Media Assistant. Generate a short, friendly, and helpful reply that sounds human. Use emojis. Max 2 sentences.";

//=========================================================================================
// Prompts
//=========================================================================================
// Each field is substituted exactly once, so user text containing a
// placeholder-like `{tone}` is left as written.

pub fn content_prompt(request: &ContentRequest) -> String {
    format!(
        "Generate Instagram content for:\n\
         Post about: {}\n\
         Target Audience: {}\n\
         Tone: {}\n\
         \n\
         Include a compelling caption, 20 trending hashtags ordered by relevance, a full reel script (hook, body, cta), and the mathematically best time to post based on this niche.",
        request.topic, request.target, request.tone
    )
}

pub fn audit_prompt(stats: &AuditStats) -> String {
    format!(
        "Perform a professional Instagram Account Audit for the following weekly metrics:\n\
         Followers: {}\n\
         Reach: {}\n\
         Impressions: {}\n\
         Engagement Rate: {}\n\
         Likes: {}\n\
         \n\
         Provide a health score (0-100), a concise summary, 3 strengths, 3 weaknesses, and 3 high-impact recommendations for growth.",
        metric(&stats.followers),
        metric(&stats.reach),
        metric(&stats.impressions),
        metric(&stats.engagement),
        metric(&stats.likes),
    )
}

pub fn trends_prompt(niche: &str) -> String {
    format!(
        "Analyze current social media trends for the niche: \"{}\".\n\
         Identify 3 viral reel/content formats and 10 trending hashtags.\n\
         For each trend, provide a viral score percentage, a trending audio suggestion, and a brief insight.",
        niche
    )
}

pub fn reply_input(context: &str, incoming_message: &str) -> String {
    format!("Context: {}\nIncoming message: \"{}\"", context, incoming_message)
}

/// Strings are embedded without their JSON quotes.
fn metric(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

//=========================================================================================
// Schemas
//=========================================================================================

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

pub fn content_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "caption": { "type": "string" },
            "hashtags": string_array(),
            "reelScript": {
                "type": "object",
                "properties": {
                    "hook": { "type": "string" },
                    "body": { "type": "string" },
                    "cta": { "type": "string" }
                },
                "required": ["hook", "body", "cta"]
            },
            "bestPostingTime": { "type": "string" }
        },
        "required": ["caption", "hashtags", "reelScript", "bestPostingTime"]
    })
}

pub fn audit_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "score": { "type": "number" },
            "summary": { "type": "string" },
            "strengths": string_array(),
            "weaknesses": string_array(),
            "recommendations": string_array()
        },
        "required": ["score", "summary", "strengths", "weaknesses", "recommendations"]
    })
}

pub fn trends_schema() -> Value {
    let trend_types: Vec<&str> = TrendType::ALL.iter().map(TrendType::label).collect();
    json!({
        "type": "object",
        "properties": {
            "trends": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "type": { "type": "string", "enum": trend_types },
                        "viralScore": { "type": "string" },
                        "audio": { "type": "string" },
                        "hashtags": string_array(),
                        "insight": { "type": "string" }
                    },
                    "required": ["title", "type", "viralScore", "audio", "insight"]
                }
            },
            "globalHashtags": string_array()
        },
        "required": ["trends", "globalHashtags"]
    })
}
