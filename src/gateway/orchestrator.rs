//! Try-on request orchestration: validation, prompt construction and bounded retries

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::traits::{GenerationOutcome, GenerationRequest, ImageGenerator};
use crate::error::{AppError, Result};
use crate::gateway::prompt::{GarmentCategory, PromptBuilder};
use crate::response::data_url::DataUrl;

/// Inbound try-on request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    #[serde(default)]
    pub user_photo: Option<String>,
    #[serde(default)]
    pub clothing_photo: Option<String>,
    #[serde(default)]
    pub garment_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Record of one upstream call made while serving a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAttempt {
    pub number: u32,
    pub outcome: GenerationOutcome,
}

/// Successful orchestration result
#[derive(Debug, Clone)]
pub struct TryOnOutput {
    pub image: String,
    pub message: Option<String>,
    pub attempts: Vec<GenerationAttempt>,
}

/// Stateless orchestrator shared by all requests
pub struct TryOnOrchestrator {
    generator: Arc<dyn ImageGenerator>,
    prompts: PromptBuilder,
    max_attempts: u32,
}

impl TryOnOrchestrator {
    pub fn new(generator: Arc<dyn ImageGenerator>, prompts: PromptBuilder, max_attempts: u32) -> Self {
        Self {
            generator,
            prompts,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Serve one try-on request end to end
    pub async fn run(&self, request: TryOnRequest) -> Result<TryOnOutput> {
        let (user_photo, clothing_photo) =
            validate_photos(request.user_photo, request.clothing_photo)?;

        let category = GarmentCategory::from_label(request.category.as_deref());
        let prompt = self
            .prompts
            .build(category, request.garment_description.as_deref());

        info!(
            category = category.as_str(),
            user_photo_len = user_photo.len(),
            clothing_photo_len = clothing_photo.len(),
            "Starting virtual try-on generation"
        );

        let generation = GenerationRequest {
            prompt,
            images: vec![user_photo, clothing_photo],
        };

        self.generate_with_retry(&generation).await
    }

    /// Call the generator until it yields an image
    ///
    /// Only content misses are retried; a non-2xx status or a client error ends
    /// the loop at once.
    pub async fn generate_with_retry(&self, request: &GenerationRequest) -> Result<TryOnOutput> {
        let mut attempts = Vec::with_capacity(self.max_attempts as usize);

        for number in 1..=self.max_attempts {
            let outcome = self.generator.generate(request).await?;
            attempts.push(GenerationAttempt {
                number,
                outcome: outcome.clone(),
            });

            match outcome {
                GenerationOutcome::Image { url, text } => {
                    info!(attempt = number, "Virtual try-on image generated");
                    return Ok(TryOnOutput {
                        image: url,
                        message: text,
                        attempts,
                    });
                }
                GenerationOutcome::Transport { status, body } => {
                    warn!(attempt = number, status, "Upstream call failed, not retrying");
                    return Err(AppError::from_upstream_status(status, body));
                }
                GenerationOutcome::Empty { text } => {
                    warn!(
                        attempt = number,
                        max_attempts = self.max_attempts,
                        reply = text.as_deref().unwrap_or(""),
                        "No image in upstream reply"
                    );
                }
            }
        }

        let details = attempts.iter().rev().find_map(|a| match &a.outcome {
            GenerationOutcome::Empty { text } => text.clone(),
            _ => None,
        });
        debug!(attempts = attempts.len(), "Generation attempts exhausted");

        Err(AppError::GenerationExhausted {
            attempts: self.max_attempts,
            details,
        })
    }
}

/// Check both photos before anything reaches the network
pub fn validate_photos(
    user_photo: Option<String>,
    clothing_photo: Option<String>,
) -> Result<(String, String)> {
    let (Some(user_photo), Some(clothing_photo)) = (
        user_photo.filter(|p| !p.is_empty()),
        clothing_photo.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::MissingPhotos);
    };

    for (field, photo) in [("userPhoto", &user_photo), ("clothingPhoto", &clothing_photo)] {
        let url = DataUrl::parse(photo).map_err(|e| AppError::InvalidPhoto {
            field,
            reason: e.to_string(),
        })?;
        debug!(
            field,
            mime = url.mime.as_str(),
            payload_len = url.payload.len(),
            "Photo accepted"
        );
    }

    Ok((user_photo, clothing_photo))
}
