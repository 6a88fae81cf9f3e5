use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::stateless_llm_interface::{CompletionBackend, LlmError};
use super::types::{ChatCompletionRequest, ChatCompletionResponse};

/// OpenAI compatible chat-completion client.
/// Works against any provider that speaks `POST /chat/completions`.
pub struct OpenAICompatibleLLM {
    client: Client,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
    project_id: Option<String>,
}

impl OpenAICompatibleLLM {
    pub fn new(
        base_url: String,
        api_key: String,
        organization_id: Option<String>,
        project_id: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Initialized OpenAICompatibleLLM: base_url={}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key,
            organization_id,
            project_id,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for OpenAICompatibleLLM {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        debug!(
            "chat_completion: model={} messages={} temperature={}",
            request.model,
            request.messages.len(),
            request.temperature
        );

        let mut http_request = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request);

        if let Some(org) = &self.organization_id {
            http_request = http_request.header("OpenAI-Organization", org);
        }
        if let Some(project) = &self.project_id {
            http_request = http_request.header("OpenAI-Project", project);
        }

        let response = http_request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Completion service error: {} - {}", status, body);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
