//! Chat-completions client for the remote image generation model

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::traits::{GenerationOutcome, GenerationRequest, ImageGenerator};
use crate::config::UpstreamConfig;
use crate::error::{AppError, Result};

/// Image generator speaking the chat-completions protocol over HTTP
pub struct ChatCompletionsBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key_env: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    modalities: [&'static str; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    images: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    image_url: Option<GeneratedImageUrl>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImageUrl {
    #[serde(default)]
    url: Option<String>,
}

impl ChatResponse {
    /// First generated image of the first choice, plus any text reply
    fn into_outcome(self) -> GenerationOutcome {
        let Some(reply) = self.choices.into_iter().next().and_then(|c| c.message) else {
            return GenerationOutcome::Empty { text: None };
        };

        let text = reply.content.and_then(reply_text);

        let url = reply
            .images
            .into_iter()
            .next()
            .and_then(|img| img.image_url)
            .and_then(|img| img.url)
            .filter(|url| !url.is_empty());

        match url {
            Some(url) => GenerationOutcome::Image { url, text },
            None => GenerationOutcome::Empty { text },
        }
    }
}

/// Text of a reply `content`, either a plain string or an array of typed parts
fn reply_text(content: Value) -> Option<String> {
    let text = match content {
        Value::String(s) => s,
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

impl ChatCompletionsBackend {
    /// Create a new backend from configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    /// The credential is looked up per call so it can be rotated without a restart
    fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::MissingCredential(self.api_key_env.clone())),
        }
    }
}

#[async_trait]
impl ImageGenerator for ChatCompletionsBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let api_key = self.api_key()?;

        let mut content = Vec::with_capacity(request.images.len() + 1);
        content.push(ContentPart::Text {
            text: &request.prompt,
        });
        content.extend(request.images.iter().map(|url| ContentPart::ImageUrl {
            image_url: ImageUrl { url },
        }));

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            modalities: ["image", "text"],
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "Sending generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Upstream returned an error status");
            return Ok(GenerationOutcome::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(parsed.into_outcome())
    }
}
