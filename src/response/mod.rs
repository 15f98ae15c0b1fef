//! Response handling module - Result serialization and data URL parsing

pub mod data_url;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::gateway::orchestrator::TryOnOutput;

/// Message used when the model returns an image without any text
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Virtual try-on generated successfully!";

/// Body returned to the caller for every try-on request
///
/// Exactly one of `image` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOnResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TryOnResult {
    pub fn succeeded(image: String, message: Option<String>) -> Self {
        Self {
            success: true,
            image: Some(image),
            message: Some(message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string())),
            error: None,
            code: None,
            details: None,
        }
    }

    pub fn failed(error: String, code: &str, details: Option<String>) -> Self {
        Self {
            success: false,
            image: None,
            message: None,
            error: Some(error),
            code: Some(code.to_string()),
            details,
        }
    }
}

impl From<TryOnOutput> for TryOnResult {
    fn from(output: TryOnOutput) -> Self {
        Self::succeeded(output.image, output.message)
    }
}

impl From<&AppError> for TryOnResult {
    fn from(error: &AppError) -> Self {
        let (_, code) = error.classify();
        Self::failed(error.to_string(), code, error.details())
    }
}
