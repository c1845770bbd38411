//! Model-side config: OpenAI endpoint and models, system prompt, history bound, image generation.

use anyhow::Result;
use smartai_core::BotError;

use super::env::{first_non_empty, parse_or, required};

/// Prompt sent to the image model by the "generate image" action.
pub const DEFAULT_IMAGE_PROMPT: &str =
    "A friendly futuristic AI assistant robot in a cozy workshop, soft light, digital art";

/// OpenAI-compatible chat, vision and image settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// OPENAI_API_KEY
    pub openai_api_key: String,
    /// OPENAI_BASE_URL
    pub openai_base_url: String,
    /// MODEL
    pub model: String,
    /// VISION_MODEL; the chat model is used when unset
    pub vision_model: Option<String>,
    /// MAX_TOKENS
    pub max_tokens: u32,
    /// SYSTEM_PROMPT or LLM_SYSTEM_PROMPT
    pub system_prompt: String,
    /// MAX_HISTORY: entries kept per user
    pub max_history: usize,
    /// IMAGE_MODEL
    pub image_model: String,
    /// IMAGE_PROMPT
    pub image_prompt: String,
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = required(&["OPENAI_API_KEY"])?;
        let openai_base_url = first_non_empty(&["OPENAI_BASE_URL"])
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        let model = first_non_empty(&["MODEL"]).unwrap_or_else(|| llm_client::DEFAULT_MODEL.to_string());
        let vision_model = first_non_empty(&["VISION_MODEL"]);
        let max_tokens = parse_or("MAX_TOKENS", llm_client::DEFAULT_MAX_TOKENS)?;
        let system_prompt = first_non_empty(&["SYSTEM_PROMPT", "LLM_SYSTEM_PROMPT"])
            .unwrap_or_else(|| prompt::DEFAULT_SYSTEM_MESSAGE.to_string());
        let max_history = parse_or("MAX_HISTORY", conversation_store::DEFAULT_MAX_HISTORY)?;
        let image_model = first_non_empty(&["IMAGE_MODEL"])
            .unwrap_or_else(|| image_generation_client::DEFAULT_IMAGE_MODEL.to_string());
        let image_prompt =
            first_non_empty(&["IMAGE_PROMPT"]).unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());

        Ok(Self {
            openai_api_key,
            openai_base_url,
            model,
            vision_model,
            max_tokens,
            system_prompt,
            max_history,
            image_model,
            image_prompt,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            return Err(BotError::Config("MAX_HISTORY must be at least 1".to_string()).into());
        }
        if self.max_tokens == 0 {
            return Err(BotError::Config("MAX_TOKENS must be at least 1".to_string()).into());
        }
        if reqwest::Url::parse(&self.openai_base_url).is_err() {
            return Err(BotError::Config(format!(
                "OPENAI_BASE_URL is not a valid URL: {}",
                self.openai_base_url
            ))
            .into());
        }
        Ok(())
    }
}
