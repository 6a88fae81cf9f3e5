use std::sync::Arc;

use crate::config::Config;
use crate::llm::{CompletionBackend, StatelessLLMFactory};
use crate::translate::TranslationGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<TranslationGateway>,
}

impl AppState {
    /// Build state from configuration. Fails when no API credential can be
    /// resolved or the provider is unknown.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key()?;
        let backend = StatelessLLMFactory::create_llm(&config.llm_config, &api_key)?;
        Ok(Self::with_backend(config, backend))
    }

    pub fn with_backend(config: &Config, backend: Arc<dyn CompletionBackend>) -> Self {
        let gateway = TranslationGateway::new(
            backend,
            config.llm_config.model.clone(),
            config.llm_config.temperature,
        );

        Self {
            gateway: Arc::new(gateway),
        }
    }
}
