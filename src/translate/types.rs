use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_structure_type() -> String {
    "default".to_string()
}

/// Body of `POST /translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
    #[serde(default = "default_structure_type")]
    pub structure_type: String,
}

/// Validated model output for the `default` structure type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTranslation {
    pub original_text: String,
    pub translated_text: String,
    pub formal_alternative: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationErrorKind {
    /// Model output was not JSON after fence stripping
    Parse,
    /// JSON did not match the structure's schema
    Validation,
    /// Transport, status or response-shape failure
    Upstream,
}

/// Failed translation as reported to callers. `kind` stays internal; the
/// wire shape is `{error, original_text}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{error}")]
pub struct TranslationError {
    #[serde(skip)]
    pub kind: TranslationErrorKind,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl TranslationError {
    pub fn parse(detail: impl std::fmt::Display, original_text: &str) -> Self {
        Self {
            kind: TranslationErrorKind::Parse,
            error: format!("JSON parsing error: {}", detail),
            original_text: Some(original_text.to_string()),
        }
    }

    pub fn validation(detail: impl std::fmt::Display, original_text: &str) -> Self {
        Self {
            kind: TranslationErrorKind::Validation,
            error: format!("Validation error: {}", detail),
            original_text: Some(original_text.to_string()),
        }
    }

    pub fn upstream(detail: impl std::fmt::Display, original_text: &str) -> Self {
        Self {
            kind: TranslationErrorKind::Upstream,
            error: format!("Translation error: {}", detail),
            original_text: Some(original_text.to_string()),
        }
    }
}
