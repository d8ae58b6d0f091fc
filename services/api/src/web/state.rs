//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::{config::Config, error::ApiError};
use socialmind_core::ports::{ContentGenerationService, GraphApiService};
use std::sync::Arc;

pub const AI_NOT_CONFIGURED: &str = "AI provider API key not configured";

/// The shared application state, created once at startup and passed to all handlers.
///
/// Nothing in here is mutated after startup; requests never share data.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub graph: Arc<dyn GraphApiService>,
    /// `None` when no AI provider key was configured.
    pub content: Option<Arc<dyn ContentGenerationService>>,
}

impl AppState {
    /// The content generator, or a configuration error when no key was supplied.
    pub fn content(&self) -> Result<&Arc<dyn ContentGenerationService>, ApiError> {
        self.content
            .as_ref()
            .ok_or_else(|| ApiError::NotConfigured(AI_NOT_CONFIGURED.to_string()))
    }
}
