//! services/api/src/adapters/content_llm.rs
//!
//! This module contains the adapter for the generative-content LLM.
//! It implements the `ContentGenerationService` port from the `core` crate.
//!
//! Structured capabilities send a JSON schema as the response format and decode
//! the first choice straight into the domain type. The reply capability is
//! free text and always yields something printable.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use socialmind_core::{
    domain::{AuditResult, AuditStats, ContentRequest, GeneratedContent, TrendBundle},
    ports::{ContentGenerationService, PortError, PortResult, FALLBACK_REPLY},
};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::adapters::schemas;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ContentGenerationService` using an
/// OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct OpenAiContentAdapter {
    client: Client<OpenAIConfig>,
    content_model: String,
    reply_model: String,
}

impl OpenAiContentAdapter {
    /// Creates a new `OpenAiContentAdapter`.
    pub fn new(client: Client<OpenAIConfig>, content_model: String, reply_model: String) -> Self {
        Self {
            client,
            content_model,
            reply_model,
        }
    }

    /// Builds a provider client that makes exactly one attempt per request.
    ///
    /// A 429 or 5xx from the provider is final, so callers see the failure
    /// (or the reply fallback) immediately.
    pub fn provider_client(api_key: &str, api_base: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Client::with_config(config).with_backoff(single_attempt())
    }

    /// Requests JSON constrained to `schema` and decodes it into `T`.
    async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema_name: &str,
        schema: Value,
    ) -> PortResult<T> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                name: schema_name.to_string(),
                description: None,
                schema: Some(schema),
                strict: None,
            },
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.content_model)
            .messages(messages)
            .response_format(response_format)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(schema = schema_name, model = %self.content_model, "Requesting structured output");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        let text = first_choice_text(response)?;
        decode_structured(&text)
    }

    async fn generate_text(&self, system: &str, user_input: String) -> PortResult<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_input)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.reply_model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        first_choice_text(response)
    }
}

fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

//=========================================================================================
// Response Helpers
//=========================================================================================

fn first_choice_text(response: CreateChatCompletionResponse) -> PortResult<String> {
    match response.choices.into_iter().next() {
        Some(choice) => choice.message.content.ok_or_else(|| {
            PortError::Malformed("LLM response contained no text content.".to_string())
        }),
        None => Err(PortError::Malformed(
            "LLM returned no choices in its response.".to_string(),
        )),
    }
}

/// Decodes provider JSON, tolerating a surrounding markdown code fence.
fn decode_structured<T: DeserializeOwned>(text: &str) -> PortResult<T> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| PortError::Malformed(format!("{} in provider output", e)))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Trimmed reply text, or the fallback when generation failed or came back empty.
fn reply_or_fallback(result: PortResult<String>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!("AI reply generation returned empty text, using fallback");
            FALLBACK_REPLY.to_string()
        }
        Err(e) => {
            error!("AI reply generation failed: {}", e);
            FALLBACK_REPLY.to_string()
        }
    }
}

//=========================================================================================
// `ContentGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentGenerationService for OpenAiContentAdapter {
    async fn generate_content(&self, request: &ContentRequest) -> PortResult<GeneratedContent> {
        self.generate_structured(
            schemas::content_prompt(request),
            schemas::CONTENT_SCHEMA_NAME,
            schemas::content_schema(),
        )
        .await
        .inspect_err(|e| error!("Content generation failed: {}", e))
    }

    async fn generate_reply(&self, context: &str, incoming_message: &str) -> String {
        let result = self
            .generate_text(
                schemas::REPLY_SYSTEM_INSTRUCTIONS,
                schemas::reply_input(context, incoming_message),
            )
            .await;
        reply_or_fallback(result)
    }

    async fn generate_audit(&self, stats: &AuditStats) -> PortResult<AuditResult> {
        self.generate_structured(
            schemas::audit_prompt(stats),
            schemas::AUDIT_SCHEMA_NAME,
            schemas::audit_schema(),
        )
        .await
        .inspect_err(|e| error!("Audit generation failed: {}", e))
    }

    async fn analyze_trends(&self, niche: &str) -> PortResult<TrendBundle> {
        self.generate_structured(
            schemas::trends_prompt(niche),
            schemas::TRENDS_SCHEMA_NAME,
            schemas::trends_schema(),
        )
        .await
        .inspect_err(|e| error!("Trend analysis failed: {}", e))
    }
}
