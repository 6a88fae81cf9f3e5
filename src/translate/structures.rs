use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use super::types::DefaultTranslation;

pub const DEFAULT_STRUCTURE: &str = "default";

const TARGET_LANGUAGE_SLOT: &str = "{target_language}";

const DEFAULT_PROMPT: &str = r#"You are a professional translator. Translate the Bangla text to {target_language}.
Return a JSON object with the following structure:
{
    "original_text": "The original Bangla text",
    "translated_text": "The translated text in {target_language}",
    "formal_alternative": "A more formal translation if applicable",
    "notes": "Any translation notes or cultural context"
}"#;

/// A validated translation of any registered structure type.
/// Serializes as the inner object, without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredTranslation {
    Default(DefaultTranslation),
}

pub type Validator = fn(Value) -> Result<StructuredTranslation, serde_json::Error>;

/// Prompt template and schema for one structure type
#[derive(Debug, Clone)]
pub struct StructureSpec {
    pub tag: &'static str,
    /// `{target_language}` is replaced before sending.
    pub prompt_template: &'static str,
    pub validate: Validator,
}

impl StructureSpec {
    pub fn system_prompt(&self, target_language: &str) -> String {
        self.prompt_template
            .replace(TARGET_LANGUAGE_SLOT, target_language)
    }
}

/// serde also accepts a JSON array for a struct, so the object check comes first.
fn expect_object(value: &Value) -> Result<(), serde_json::Error> {
    if value.is_object() {
        Ok(())
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a JSON object, got {}",
            value
        )))
    }
}

fn validate_default(value: Value) -> Result<StructuredTranslation, serde_json::Error> {
    expect_object(&value)?;
    serde_json::from_value::<DefaultTranslation>(value).map(StructuredTranslation::Default)
}

#[derive(Debug, Clone)]
pub struct StructureRegistry {
    entries: HashMap<&'static str, StructureSpec>,
}

impl StructureRegistry {
    pub fn register(&mut self, spec: StructureSpec) {
        self.entries.insert(spec.tag, spec);
    }

    /// Unknown tags resolve to the `default` structure.
    pub fn resolve(&self, tag: &str) -> &StructureSpec {
        if let Some(spec) = self.entries.get(tag) {
            return spec;
        }
        warn!("Unknown structure type '{}', using '{}'", tag, DEFAULT_STRUCTURE);
        &self.entries[DEFAULT_STRUCTURE]
    }

    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.entries.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for StructureRegistry {
    fn default() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.register(StructureSpec {
            tag: DEFAULT_STRUCTURE,
            prompt_template: DEFAULT_PROMPT,
            validate: validate_default,
        });
        registry
    }
}
