//! Shared harness for the end-to-end route tests.
//!
//! Each server gets its own Graph API and AI provider mock, so tests can
//! assert exactly which upstream calls a request produced.

#![allow(dead_code)]

use api_lib::{
    adapters::{GraphApiAdapter, OpenAiContentAdapter},
    config::Config,
    web::{build_router, AppState},
};
use serde_json::{json, Value};
use socialmind_core::ports::ContentGenerationService;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use wiremock::{MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub struct TestServer {
    pub addr: String,
    pub client: reqwest::Client,
    pub graph: MockServer,
    pub ai: MockServer,
}

impl TestServer {
    /// A server with an AI provider key configured.
    pub async fn new() -> Self {
        Self::start(true).await
    }

    /// A server started without any AI provider key.
    pub async fn without_ai() -> Self {
        Self::start(false).await
    }

    /// A server whose AI provider base URL refuses connections.
    pub async fn unreachable_ai() -> Self {
        Self::start_with(true, Some("http://127.0.0.1:1".to_string())).await
    }

    async fn start(with_ai: bool) -> Self {
        Self::start_with(with_ai, None).await
    }

    async fn start_with(with_ai: bool, ai_base: Option<String>) -> Self {
        let graph = MockServer::start().await;
        let ai = MockServer::start().await;

        let mut vars = HashMap::from([
            ("GRAPH_API_BASE_URL".to_string(), graph.uri()),
            ("AI_API_BASE".to_string(), ai_base.unwrap_or_else(|| ai.uri())),
            ("CONTENT_MODEL".to_string(), "test-content-model".to_string()),
            ("REPLY_MODEL".to_string(), "test-reply-model".to_string()),
        ]);
        if with_ai {
            vars.insert("AI_API_KEY".to_string(), "test-key".to_string());
        }
        let config = Arc::new(Config::from_lookup(|name| vars.get(name).cloned()).unwrap());

        // A stuck upstream fails the test instead of hanging it.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        let graph_adapter = Arc::new(GraphApiAdapter::new(
            http.clone(),
            config.graph_api_base_url.clone(),
        ));
        let content = config.ai_api_key.as_ref().map(|key| {
            let openai = OpenAiContentAdapter::provider_client(key, &config.ai_api_base);
            Arc::new(OpenAiContentAdapter::new(
                openai,
                config.content_model.clone(),
                config.reply_model.clone(),
            )) as Arc<dyn ContentGenerationService>
        });

        let state = Arc::new(AppState {
            config,
            graph: graph_adapter,
            content,
        });
        let app = build_router(state).unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: http,
            graph,
            ai,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Number of requests the Graph API mock has seen.
    pub async fn graph_calls(&self) -> usize {
        self.graph
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }

    pub async fn ai_calls(&self) -> usize {
        self.ai
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }
}

/// A minimal chat completion whose only choice carries `content`.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 10, "total_tokens": 20 }
    })
}

/// An OpenAI-style error response with the given status.
pub fn provider_error(status: u16, kind: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": { "message": "provider unavailable", "type": kind, "param": null, "code": null }
    }))
}

/// Decodes a response body, panicking with the raw text when it is not JSON.
pub async fn body(response: reqwest::Response) -> Value {
    let text = response.text().await.unwrap();
    serde_json::from_str(&text).unwrap_or_else(|_| panic!("response was not JSON: {}", text))
}
