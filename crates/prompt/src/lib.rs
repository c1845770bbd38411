//! # Prompt
//!
//! Chat message types shared by the conversation store and the LLM client, plus helpers that
//! assemble the message list sent to the model.
//!
//! ## Shape
//!
//! - [`ChatMessage`]: one element of the OpenAI `messages` array (role + content).
//! - [`MessageContent`]: plain text, or text with an inline image (multimodal user turn).
//! - [`build_request_messages`]: `[system] + history + current`, the order the model expects.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// Message body: text, or text plus an image given as a URL (usually a `data:` URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Image {
        text: Option<String>,
        image_url: String,
    },
}

impl MessageContent {
    /// Builds an image content from raw bytes as a base64 `data:` URL.
    pub fn image_from_bytes(text: Option<String>, bytes: &[u8], mime_type: &str) -> Self {
        MessageContent::Image {
            text,
            image_url: image_data_url(bytes, mime_type),
        }
    }

    /// The text part, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(t) => Some(t),
            MessageContent::Image { text, .. } => text.as_deref(),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MessageContent::Image { .. })
    }

    /// Short single-line preview for logs; never includes image data.
    pub fn preview(&self, max_chars: usize) -> String {
        let text = self.text().unwrap_or("");
        let mut out: String = text.chars().take(max_chars).collect();
        if text.chars().count() > max_chars {
            out.push('…');
        }
        if self.is_image() {
            out.insert_str(0, "[image] ");
        }
        out
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Text(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Text(s.to_string())
    }
}

/// A single chat message, one-to-one with one element of the OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }

    /// User message carrying an image (and optional question text).
    pub fn user_image(text: Option<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Image {
                text,
                image_url: image_url.into(),
            },
        }
    }
}

/// Default system instruction when no custom system prompt is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "Ты умный ассистент";

/// Encodes bytes as `data:{mime};base64,{...}` for image parts.
pub fn image_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Builds the request message list: system prompt first, then history in order, then the current message.
pub fn build_request_messages(
    system_prompt: &str,
    history: &[ChatMessage],
    current: ChatMessage,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history.iter().cloned());
    messages.push(current);
    messages
}
