//! Telegram → core conversions for users, messages and button presses.

use smartai_core::{Chat, Message, MessageKind, ToCoreMessage, ToCoreUser, User};
use teloxide::types::{CallbackQuery, MaybeInaccessibleMessage};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Telegram message to core event: text (or command), or photo with caption.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Only text and photo messages are dispatched.
    pub fn is_supported(&self) -> bool {
        self.0.text().is_some() || self.0.photo().is_some()
    }

    fn kind_and_content(&self) -> (MessageKind, String) {
        if let Some(text) = self.0.text() {
            return (MessageKind::from_text(text), text.to_string());
        }
        if let Some(largest) = self.0.photo().and_then(|sizes| sizes.last()) {
            let caption = self.0.caption().unwrap_or("").to_string();
            return (
                MessageKind::Photo {
                    file_id: largest.file.id.0.clone(),
                },
                caption,
            );
        }
        (MessageKind::Text, String::new())
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    /// `None` for unsupported messages and for messages without a sender (channel posts,
    /// anonymous admins), which have no user to key history on.
    fn to_core(&self) -> Option<Message> {
        if !self.is_supported() {
            return None;
        }
        let user = TelegramUserWrapper(self.0.from.as_ref()?).to_core();
        let (kind, content) = self.kind_and_content();
        let mut message = Message::new(self.0.id.to_string(), user, core_chat(&self.0.chat), kind, content);

        if let Some(replied) = self.0.reply_to_message() {
            message.reply_to_message_id = Some(replied.id.to_string());
            message.reply_to_user_id = replied.from.as_ref().map(|u| u.id.0 as i64);
            message.reply_to_message_from_bot = replied.from.as_ref().is_some_and(|u| u.is_bot);
        }
        Some(message)
    }
}

/// Button press to core event. `None` when the keyboard message is unknown (inline-mode presses).
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Option<Message> {
        let source: &MaybeInaccessibleMessage = self.0.message.as_ref()?;
        let message_id = source.id().to_string();
        let data = self.0.data.clone().unwrap_or_default();
        Some(Message::new(
            message_id.clone(),
            TelegramUserWrapper(&self.0.from).to_core(),
            core_chat(source.chat()),
            MessageKind::Callback {
                data,
                message_id: Some(message_id),
            },
            "",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("ru".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    fn parse_message(json: serde_json::Value) -> teloxide::types::Message {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_group_reply_to_bot_keeps_reply_context() {
        let msg = parse_message(serde_json::json!({
            "message_id": 10,
            "date": 1706529600,
            "chat": {"id": -100, "type": "supergroup", "title": "Team"},
            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
            "text": "and tomorrow?",
            "reply_to_message": {
                "message_id": 9,
                "date": 1706529500,
                "chat": {"id": -100, "type": "supergroup", "title": "Team"},
                "from": {"id": 42, "is_bot": true, "first_name": "SmartAI", "username": "smartai_bot"},
                "text": "Sunny today"
            }
        }));

        let core = TelegramMessageWrapper(&msg).to_core().unwrap();

        assert_eq!(core.id, "10");
        assert_eq!(core.user.id, 7);
        assert_eq!(core.chat.id, -100);
        assert_eq!(core.chat.chat_type, "supergroup");
        assert_eq!(core.kind, MessageKind::Text);
        assert_eq!(core.content, "and tomorrow?");
        assert_eq!(core.reply_to_message_id.as_deref(), Some("9"));
        assert_eq!(core.reply_to_user_id, Some(42));
        assert!(core.reply_to_message_from_bot);
    }

    #[test]
    fn test_photo_uses_largest_size_and_caption() {
        let msg = parse_message(serde_json::json!({
            "message_id": 11,
            "date": 1706529600,
            "chat": {"id": 7, "type": "private", "first_name": "Ann"},
            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
            "caption": "what is it?",
            "photo": [
                {"file_id": "small", "file_unique_id": "s", "width": 90, "height": 90, "file_size": 1000},
                {"file_id": "large", "file_unique_id": "l", "width": 1280, "height": 1280, "file_size": 90000}
            ]
        }));

        let wrapper = TelegramMessageWrapper(&msg);
        assert!(wrapper.is_supported());
        let core = wrapper.to_core().unwrap();

        assert_eq!(core.chat.chat_type, "private");
        assert_eq!(
            core.kind,
            MessageKind::Photo {
                file_id: "large".to_string()
            }
        );
        assert_eq!(core.content, "what is it?");
        assert!(core.reply_to_message_id.is_none());
    }

    #[test]
    fn test_command_text_is_classified() {
        let msg = parse_message(serde_json::json!({
            "message_id": 12,
            "date": 1706529600,
            "chat": {"id": 7, "type": "private", "first_name": "Ann"},
            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
            "text": "/start@smartai_bot",
            "entities": [{"type": "bot_command", "offset": 0, "length": 18}]
        }));

        let core = TelegramMessageWrapper(&msg).to_core().unwrap();
        assert_eq!(
            core.kind,
            MessageKind::Command {
                name: "start".to_string(),
                args: String::new(),
                target: Some("smartai_bot".to_string()),
            }
        );
    }

    #[test]
    fn test_message_without_sender_is_dropped() {
        let msg = parse_message(serde_json::json!({
            "message_id": 13,
            "date": 1706529600,
            "chat": {"id": -100, "type": "supergroup", "title": "Team"},
            "sender_chat": {"id": -100, "type": "supergroup", "title": "Team"},
            "text": "@smartai_bot hello from an anonymous admin"
        }));

        let wrapper = TelegramMessageWrapper(&msg);
        assert!(wrapper.is_supported());
        assert!(wrapper.to_core().is_none());
    }

    #[test]
    fn test_unsupported_message_is_dropped() {
        let msg = parse_message(serde_json::json!({
            "message_id": 14,
            "date": 1706529600,
            "chat": {"id": 7, "type": "private", "first_name": "Ann"},
            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
            "location": {"latitude": 55.75, "longitude": 37.62}
        }));

        assert!(TelegramMessageWrapper(&msg).to_core().is_none());
    }
}
