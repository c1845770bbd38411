//! Incoming event type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// What kind of update the event carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Plain text (not a command).
    Text,
    /// `/name[@target] args`; `name` is lowercase without the leading slash. `target` is the
    /// `@botname` suffix, if any, naming the bot the command is addressed to.
    Command {
        name: String,
        args: String,
        target: Option<String>,
    },
    /// Photo; `file_id` references the largest size. Caption (if any) is in `content`.
    Photo { file_id: String },
    /// Inline keyboard button press; `message_id` is the message carrying the keyboard.
    Callback {
        data: String,
        message_id: Option<String>,
    },
}

impl MessageKind {
    /// Classifies message text: `/cmd[@bot] args` becomes [`MessageKind::Command`], anything else [`MessageKind::Text`].
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim_start();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return MessageKind::Text;
        };
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target.to_string()).filter(|t| !t.is_empty())),
            None => (head, None),
        };
        if name.is_empty() {
            return MessageKind::Text;
        }
        MessageKind::Command {
            name: name.to_lowercase(),
            args: args.to_string(),
            target,
        }
    }

    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Command { .. } => "command",
            MessageKind::Photo { .. } => "photo",
            MessageKind::Callback { .. } => "callback",
        }
    }
}

/// A single incoming event with user, chat, content, and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text, or the caption of a photo; empty for callbacks.
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// Author of the replied-to message; compared with the bot's own id for gating.
    pub reply_to_user_id: Option<i64>,
    /// Whether the replied-to message was sent by a bot; fallback when the bot's own id is unknown.
    pub reply_to_message_from_bot: bool,
}

impl Message {
    /// Builds an event with no reply context and `created_at = now`.
    pub fn new(
        id: impl Into<String>,
        user: User,
        chat: Chat,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            kind,
            created_at: Utc::now(),
            reply_to_message_id: None,
            reply_to_user_id: None,
            reply_to_message_from_bot: false,
        }
    }

    /// Marks the event as a reply to `message_id` written by `user_id`.
    pub fn replying_to(mut self, message_id: impl Into<String>, user_id: i64, from_bot: bool) -> Self {
        self.reply_to_message_id = Some(message_id.into());
        self.reply_to_user_id = Some(user_id);
        self.reply_to_message_from_bot = from_bot;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_plain() {
        assert_eq!(MessageKind::from_text("hello"), MessageKind::Text);
        assert_eq!(MessageKind::from_text("a /b"), MessageKind::Text);
        assert_eq!(MessageKind::from_text("/"), MessageKind::Text);
    }

    #[test]
    fn test_from_text_command() {
        assert_eq!(
            MessageKind::from_text("/start"),
            MessageKind::Command {
                name: "start".to_string(),
                args: String::new(),
                target: None,
            }
        );
        assert_eq!(
            MessageKind::from_text("/Start@SmartBot  now please "),
            MessageKind::Command {
                name: "start".to_string(),
                args: "now please".to_string(),
                target: Some("SmartBot".to_string()),
            }
        );
    }

    #[test]
    fn test_command_addressed_to_other_bot_keeps_target() {
        match MessageKind::from_text("/clear@some_other_bot") {
            MessageKind::Command { name, target, .. } => {
                assert_eq!(name, "clear");
                assert_eq!(target.as_deref(), Some("some_other_bot"));
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_replying_to_sets_reply_context() {
        let msg = Message::new(
            "1",
            User {
                id: 7,
                username: None,
                first_name: None,
                last_name: None,
            },
            Chat {
                id: 9,
                chat_type: "group".to_string(),
            },
            MessageKind::Text,
            "hi",
        )
        .replying_to("5", 42, true);

        assert_eq!(msg.reply_to_message_id.as_deref(), Some("5"));
        assert_eq!(msg.reply_to_user_id, Some(42));
        assert!(msg.reply_to_message_from_bot);
    }
}
