//! OpenAI implementation of LlmClient: wraps openai-client, picks the vision model for image turns.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default completion cap.
pub const DEFAULT_MAX_TOKENS: u32 = 600;

/// LlmClient backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    vision_model: Option<String>,
    max_tokens: Option<u32>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self::from_client(openai_client::OpenAIClient::new(api_key))
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_client(openai_client::OpenAIClient::with_base_url(api_key, base_url))
    }

    pub fn from_client(client: openai_client::OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            vision_model: None,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Model used when the request contains an image; falls back to the chat model.
    pub fn with_vision_model_opt(mut self, model: Option<String>) -> Self {
        self.vision_model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_for(&self, messages: &[ChatMessage]) -> &str {
        let has_image = messages.iter().any(|m| m.content.is_image());
        match (&self.vision_model, has_image) {
            (Some(vision), true) => vision,
            _ => &self.model,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let model = self.model_for(&messages).to_string();
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client
            .chat_completion(&model, openai_messages, self.max_tokens)
            .await
    }
}
