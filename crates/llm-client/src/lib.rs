//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation. Transport-agnostic;
//! handlers hold an `Arc<dyn LlmClient>` so tests can swap in a scripted model.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use prompt::{ChatMessage, MessageContent, MessageRole};

mod openai_llm;

pub use openai_llm::{OpenAILlmClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// LLM client interface: one completion for a fully assembled message list.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text. `messages` already contains the system prompt, history
    /// and current user message in request order.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
///
/// User images become a multimodal content array (optional text part, then the image part).
/// System and assistant messages only carry text.
pub(crate) fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let text = msg.content.text().unwrap_or_default().to_string();
    let openai_msg: ChatCompletionRequestMessage = match (msg.role, &msg.content) {
        (MessageRole::System, _) => ChatCompletionRequestSystemMessageArgs::default()
            .content(text)
            .build()?
            .into(),
        (MessageRole::Assistant, _) => ChatCompletionRequestAssistantMessageArgs::default()
            .content(text)
            .build()?
            .into(),
        (MessageRole::User, MessageContent::Text(t)) => ChatCompletionRequestUserMessageArgs::default()
            .content(t.clone())
            .build()?
            .into(),
        (MessageRole::User, MessageContent::Image { text, image_url }) => {
            let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::with_capacity(2);
            if let Some(t) = text.as_deref().filter(|t| !t.trim().is_empty()) {
                parts.push(
                    ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(t)
                        .build()?
                        .into(),
                );
            }
            parts.push(
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(ImageUrlArgs::default().url(image_url.as_str()).build()?)
                    .build()?
                    .into(),
            );
            ChatCompletionRequestUserMessageArgs::default()
                .content(parts)
                .build()?
                .into()
        }
    };
    Ok(openai_msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_user_message_is_plain_string() {
        let msg = chat_message_to_openai(&ChatMessage::user("hi")).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_image_user_message_is_content_array() {
        let msg = chat_message_to_openai(&ChatMessage::user_image(
            Some("what is this?".to_string()),
            "data:image/jpeg;base64,AAAA",
        ))
        .unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        let parts = json["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "what is this?");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_image_without_text_has_only_image_part() {
        let msg = chat_message_to_openai(&ChatMessage::user_image(None, "data:image/png;base64,AA")).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["content"].as_array().unwrap().len(), 1);
    }
}
