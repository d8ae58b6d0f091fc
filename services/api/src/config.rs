//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_AI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GRAPH_API_BASE_URL: &str = "https://graph.instagram.com/v18.0";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Without a key the content, trend and audit routes answer with a
    /// configuration error instead of calling the provider.
    pub ai_api_key: Option<String>,
    pub ai_api_base: String,
    pub content_model: String,
    pub reply_model: String,
    pub graph_api_base_url: String,
    pub frontend_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // --- Load Server Settings ---
        let bind_address = match var("BIND_ADDRESS") {
            Some(addr) => addr.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => {
                let port = match var("PORT") {
                    Some(port) => port.trim().parse::<u16>().map_err(|e| {
                        ConfigError::InvalidValue("PORT".to_string(), e.to_string())
                    })?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load AI Provider Settings ---
        let ai_api_key = var("GEMINI_API_KEY").or_else(|| var("AI_API_KEY"));
        let ai_api_base = var("AI_API_BASE").unwrap_or_else(|| DEFAULT_AI_API_BASE.to_string());
        let content_model = var("CONTENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let reply_model = var("REPLY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // --- Load Upstream and CORS Settings ---
        let graph_api_base_url = var("GRAPH_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GRAPH_API_BASE_URL.to_string());
        let frontend_url =
            var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

        Ok(Self {
            bind_address,
            log_level,
            ai_api_key,
            ai_api_base,
            content_model,
            reply_model,
            graph_api_base_url,
            frontend_url,
        })
    }
}
