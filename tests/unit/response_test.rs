//! Unit tests for result serialization

use serde_json::json;
use tryon_gateway::backend::traits::GenerationOutcome;
use tryon_gateway::gateway::orchestrator::{GenerationAttempt, TryOnOutput};
use tryon_gateway::response::{TryOnResult, DEFAULT_SUCCESS_MESSAGE};
use tryon_gateway::AppError;

fn assert_exactly_one_branch(result: &TryOnResult) {
    assert!(
        result.image.is_some() ^ result.error.is_some(),
        "expected exactly one of image/error: {result:?}"
    );
    assert_eq!(result.success, result.image.is_some());
}

#[test]
fn test_success_uses_default_message() {
    let result = TryOnResult::from(TryOnOutput {
        image: "data:image/png;base64,OUT".to_string(),
        message: None,
        attempts: vec![GenerationAttempt {
            number: 1,
            outcome: GenerationOutcome::Image {
                url: "data:image/png;base64,OUT".to_string(),
                text: None,
            },
        }],
    });

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": true,
            "image": "data:image/png;base64,OUT",
            "message": DEFAULT_SUCCESS_MESSAGE,
        })
    );
}

#[test]
fn test_success_keeps_model_text() {
    let result = TryOnResult::succeeded(
        "data:image/png;base64,OUT".to_string(),
        Some("Here is the outfit".to_string()),
    );
    assert_eq!(result.message.as_deref(), Some("Here is the outfit"));
    assert_exactly_one_branch(&result);
}

#[test]
fn test_failure_shape() {
    let result = TryOnResult::from(&AppError::GenerationExhausted {
        attempts: 3,
        details: Some("I cannot do that".to_string()),
    });

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["code"], json!("generation_exhausted"));
    assert_eq!(value["details"], json!("I cannot do that"));
    assert!(value.get("image").is_none());
    assert!(value.get("message").is_none());
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate try-on image"));
}

#[test]
fn test_every_error_has_one_branch() {
    let errors = vec![
        AppError::MissingPhotos,
        AppError::InvalidPhoto {
            field: "clothingPhoto",
            reason: "unsupported".to_string(),
        },
        AppError::InvalidRequest("bad json".to_string()),
        AppError::MissingCredential("LOVABLE_API_KEY".to_string()),
        AppError::RateLimited,
        AppError::QuotaExhausted,
        AppError::UpstreamStatus {
            status: 503,
            body: "unavailable".to_string(),
        },
        AppError::UpstreamPayload("expected value".to_string()),
        AppError::GenerationExhausted {
            attempts: 3,
            details: None,
        },
        AppError::Internal("boom".to_string()),
    ];

    for error in &errors {
        let result = TryOnResult::from(error);
        assert_exactly_one_branch(&result);
        assert!(!result.success);
        assert_eq!(result.code.as_deref(), Some(error.classify().1));
    }
}

#[test]
fn test_missing_credential_names_variable() {
    let result = TryOnResult::from(&AppError::MissingCredential("LOVABLE_API_KEY".to_string()));
    assert_eq!(
        result.error.as_deref(),
        Some("LOVABLE_API_KEY is not configured")
    );
    assert_eq!(result.code.as_deref(), Some("configuration_error"));
    assert_eq!(result.details, None);
}
