//! Tests for [`prompt::build_request_messages`] and message constructors.

use prompt::{build_request_messages, ChatMessage, MessageContent, MessageRole};

/// **Test: system prompt first, history in order, current message last.**
#[test]
fn build_request_messages_orders_system_history_current() {
    let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello!")];
    let messages = build_request_messages("be brief", &history, ChatMessage::user("how are you?"));

    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User
        ]
    );
    assert_eq!(messages[0].content, MessageContent::Text("be brief".to_string()));
    assert_eq!(messages[3].content.text(), Some("how are you?"));
}

/// **Test: empty history yields exactly system + current.**
#[test]
fn build_request_messages_empty_history() {
    let messages = build_request_messages("sys", &[], ChatMessage::user("q"));
    assert_eq!(messages.len(), 2);
}

/// **Test: user_image keeps the question text and the image URL.**
#[test]
fn user_image_is_multimodal_user_message() {
    let msg = ChatMessage::user_image(Some("describe".to_string()), "data:image/jpeg;base64,AAAA");
    assert_eq!(msg.role, MessageRole::User);
    assert!(msg.content.is_image());
    assert_eq!(msg.content.text(), Some("describe"));
}
