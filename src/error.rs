//! Common error types for the try-on gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::TryOnResult;

/// Longest slice of an upstream error body echoed back in `details`
const MAX_DETAILS_LEN: usize = 500;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0} is not configured")]
    MissingCredential(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Both user photo and clothing photo are required")]
    MissingPhotos,

    #[error("Invalid {field}: {reason}")]
    InvalidPhoto { field: &'static str, reason: String },

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("Too many requests to this service. Please slow down.")]
    InboundRateLimited,

    #[error("AI credits exhausted. Please add credits to continue.")]
    QuotaExhausted,

    #[error("AI Gateway error: {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Failed to reach the image generation service")]
    HttpClient(#[source] reqwest::Error),

    #[error("The image generation service did not respond in time")]
    Timeout(#[source] reqwest::Error),

    #[error("Unexpected reply from the image generation service")]
    UpstreamPayload(String),

    #[error("Failed to generate try-on image. The AI could not process the images. Please try again with different photos.")]
    GenerationExhausted {
        attempts: u32,
        details: Option<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build the error for a non-2xx upstream status
    pub fn from_upstream_status(status: u16, body: String) -> Self {
        match status {
            429 => AppError::RateLimited,
            402 => AppError::QuotaExhausted,
            _ => AppError::UpstreamStatus { status, body },
        }
    }

    /// HTTP status and stable machine-readable code for this error
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) | AppError::MissingCredential(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::MissingPhotos => (StatusCode::BAD_REQUEST, "missing_photos"),
            AppError::InvalidPhoto { .. } => (StatusCode::BAD_REQUEST, "invalid_photo"),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            AppError::InboundRateLimited => {
                (StatusCode::TOO_MANY_REQUESTS, "inbound_rate_limited")
            }
            AppError::QuotaExhausted => (StatusCode::PAYMENT_REQUIRED, "quota_exhausted"),
            AppError::UpstreamStatus { .. }
            | AppError::HttpClient(_)
            | AppError::UpstreamPayload(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "generation_failed")
            }
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
            AppError::GenerationExhausted { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "generation_exhausted")
            }
        }
    }

    /// Diagnostic text kept apart from the user-facing message
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::UpstreamStatus { body, .. } if !body.trim().is_empty() => {
                Some(truncate(body.trim(), MAX_DETAILS_LEN))
            }
            AppError::HttpClient(e) | AppError::Timeout(e) => Some(e.to_string()),
            AppError::UpstreamPayload(reason) => Some(reason.clone()),
            AppError::GenerationExhausted { details, .. } => Some(
                details
                    .clone()
                    .unwrap_or_else(|| "No additional details available".to_string()),
            ),
            _ => None,
        }
    }
}

fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        // The endpoint URL stays out of anything returned to callers
        let e = e.without_url();
        if e.is_timeout() {
            AppError::Timeout(e)
        } else if e.is_decode() {
            AppError::UpstreamPayload(e.to_string())
        } else {
            AppError::HttpClient(e)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.classify();
        (status, Json(TryOnResult::from(&self))).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
