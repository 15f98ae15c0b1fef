//! Virtual Try-On Gateway
//!
//! Validates try-on requests, builds the multimodal instruction and drives a
//! remote image generation model with a bounded retry policy.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod response;

pub use error::{AppError, Result};

use std::sync::Arc;

use backend::{http_backend::ChatCompletionsBackend, traits::ImageGenerator};
use gateway::{orchestrator::TryOnOrchestrator, prompt::PromptBuilder};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub orchestrator: Arc<TryOnOrchestrator>,
}

impl AppState {
    /// Wire the state around an arbitrary generator
    pub fn new(settings: config::Settings, generator: Arc<dyn ImageGenerator>) -> Self {
        let orchestrator = TryOnOrchestrator::new(
            generator,
            PromptBuilder::default(),
            settings.upstream.max_attempts,
        );

        Self {
            settings: Arc::new(settings),
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Wire the state around the configured chat-completions upstream
    pub fn from_settings(settings: config::Settings) -> Result<Self> {
        let generator = Arc::new(ChatCompletionsBackend::new(&settings.upstream)?);
        Ok(Self::new(settings, generator))
    }
}
