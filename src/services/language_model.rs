use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the service to answer with a single JSON object.
    pub json_mode: bool,
}

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Returns the assistant's reply text, or an empty string when the
    /// service produced no choices.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}
