use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::openai_compatible_llm::OpenAICompatibleLLM;
use super::stateless_llm_interface::CompletionBackend;
use crate::config::LlmConfig;

/// Factory for creating completion backends
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Default endpoint for a provider that speaks the OpenAI protocol.
    pub fn default_base_url(llm_provider: &str) -> Option<&'static str> {
        match llm_provider {
            "openai_llm" | "openai_compatible_llm" => Some("https://api.openai.com/v1"),
            "ollama_llm" => Some("http://localhost:11434/v1"),
            "deepseek_llm" => Some("https://api.deepseek.com/v1"),
            "groq_llm" => Some("https://api.groq.com/openai/v1"),
            "mistral_llm" => Some("https://api.mistral.ai/v1"),
            "gemini_llm" => Some("https://generativelanguage.googleapis.com/v1beta/openai"),
            _ => None,
        }
    }

    /// Create a backend based on the configuration.
    ///
    /// # Arguments
    /// * `config` - LLM configuration; `provider` selects the implementation
    /// * `api_key` - resolved credential
    pub fn create_llm(config: &LlmConfig, api_key: &str) -> Result<Arc<dyn CompletionBackend>> {
        let llm_provider = config.provider.as_str();
        info!("Initializing LLM: {}", llm_provider);

        let default_url = Self::default_base_url(llm_provider)
            .ok_or_else(|| anyhow::anyhow!("Unsupported LLM provider: {}", llm_provider))?;
        let base_url = config
            .base_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| default_url.to_string());

        Ok(Arc::new(OpenAICompatibleLLM::new(
            base_url,
            api_key.to_string(),
            config.organization_id.clone(),
            config.project_id.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )?))
    }
}
