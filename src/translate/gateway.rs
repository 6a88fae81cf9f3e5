use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use super::structures::{StructureRegistry, StructuredTranslation, DEFAULT_STRUCTURE};
use super::types::{DefaultTranslation, TranslationError};
use crate::llm::{ChatCompletionRequest, ChatMessage, CompletionBackend};

/// Remove the ```` ```json ```` / ```` ``` ```` wrapping the completion
/// service sometimes puts around JSON. Unfenced input is returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Turns Bangla text into a validated structured translation through a
/// completion backend. Holds no per-request state.
pub struct TranslationGateway {
    backend: Arc<dyn CompletionBackend>,
    registry: StructureRegistry,
    model: String,
    temperature: f32,
}

impl TranslationGateway {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: String, temperature: f32) -> Self {
        Self {
            backend,
            registry: StructureRegistry::default(),
            model,
            temperature,
        }
    }

    pub fn with_registry(mut self, registry: StructureRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &StructureRegistry {
        &self.registry
    }

    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<DefaultTranslation, TranslationError> {
        match self
            .translate_structured(text, target_language, DEFAULT_STRUCTURE)
            .await?
        {
            StructuredTranslation::Default(translation) => Ok(translation),
        }
    }

    pub async fn translate_structured(
        &self,
        text: &str,
        target_language: &str,
        structure_type: &str,
    ) -> Result<StructuredTranslation, TranslationError> {
        let span = tracing::info_span!(
            "translate",
            request_id = %Uuid::new_v4(),
            target_language = %target_language,
            structure_type = %structure_type,
        );

        async move {
            info!("Translating text ({} chars)", text.chars().count());
            let result = self.run(text, target_language, structure_type).await;
            match &result {
                Ok(translation) => info!("Translation result: {:?}", translation),
                Err(e) => warn!("Translation failed: {}", e.error),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        text: &str,
        target_language: &str,
        structure_type: &str,
    ) -> Result<StructuredTranslation, TranslationError> {
        let spec = self.registry.resolve(structure_type);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(spec.system_prompt(target_language)),
                ChatMessage::user(text),
            ],
            temperature: self.temperature,
        };

        let response = self
            .backend
            .chat_completion(request)
            .await
            .map_err(|e| TranslationError::upstream(e, text))?;

        let content = response
            .first_content()
            .ok_or_else(|| TranslationError::upstream("completion response has no content", text))?;
        debug!("Raw completion: {}", content);

        let value: serde_json::Value = serde_json::from_str(strip_code_fences(content))
            .map_err(|e| TranslationError::parse(e, text))?;

        (spec.validate)(value).map_err(|e| TranslationError::validation(e, text))
    }
}
