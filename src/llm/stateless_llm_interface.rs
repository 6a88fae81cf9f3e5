use async_trait::async_trait;
use thiserror::Error;

use super::types::{ChatCompletionRequest, ChatCompletionResponse};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to completion service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Interface for a stateless chat-completion backend.
/// Stateless means the backend keeps no memory between calls; every request
/// carries its full message list.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one chat-completion request and return the raw response
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError>;
}
