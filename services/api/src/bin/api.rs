//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GraphApiAdapter, OpenAiContentAdapter},
    config::Config,
    error::ApiError,
    web::{build_router, AppState},
};
use socialmind_core::ports::ContentGenerationService;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder()
        .build()
        .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;
    let graph = Arc::new(GraphApiAdapter::new(
        http,
        config.graph_api_base_url.clone(),
    ));

    let content: Option<Arc<dyn ContentGenerationService>> = match &config.ai_api_key {
        Some(api_key) => {
            let openai_client =
                OpenAiContentAdapter::provider_client(api_key, &config.ai_api_base);
            Some(Arc::new(OpenAiContentAdapter::new(
                openai_client,
                config.content_model.clone(),
                config.reply_model.clone(),
            )))
        }
        None => {
            warn!("No AI provider API key set; content, trend and audit routes are disabled");
            None
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        graph,
        content,
    });

    // --- 4. Create the Web Router ---
    let app = build_router(app_state)?;

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!("API base URL: http://{}/api", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
