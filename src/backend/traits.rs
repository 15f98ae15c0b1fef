//! Common traits and types for image generation backends

use async_trait::async_trait;

use crate::error::Result;

/// One multimodal generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Instruction text for the model
    pub prompt: String,

    /// Image attachments as data URLs, in the order the prompt refers to them
    pub images: Vec<String>,
}

/// What a single upstream call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The upstream answered with a non-2xx status
    Transport { status: u16, body: String },

    /// 2xx, but the model produced no image
    Empty { text: Option<String> },

    /// 2xx with a generated image
    Image { url: String, text: Option<String> },
}

impl GenerationOutcome {
    pub fn is_image(&self) -> bool {
        matches!(self, GenerationOutcome::Image { .. })
    }
}

/// Trait for image generation backends
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Issue one generation call
    ///
    /// Errors are reserved for failures with no upstream status (missing
    /// credential, connection, timeout, unreadable body).
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome>;
}
