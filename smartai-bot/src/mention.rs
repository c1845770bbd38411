//! Pure functions for group-chat gating: @-mention detection, reply-to-bot detection and
//! question extraction.

use smartai_core::Message;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Prompt used when the user only @mentions the bot with no text.
pub const DEFAULT_EMPTY_MENTION_PROMPT: &str =
    "Пользователь просто упомянул тебя без вопроса. Коротко поприветствуй его и предложи задать вопрос.";

/// Question sent with a photo that has no caption.
pub const DEFAULT_PHOTO_QUESTION: &str = "Что изображено на этой картинке?";

/// The bot's own Telegram identity, filled from `getMe` before dispatching starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: Option<i64>,
    pub username: Option<String>,
}

/// Identity shared between the runner (writer, after `getMe`) and the handlers (readers).
pub type SharedIdentity = Arc<RwLock<BotIdentity>>;

/// Byte ranges of every `@bot_username` token in `text`.
///
/// Telegram usernames are ASCII and case-insensitive; a match must end at a token boundary so
/// `@smartai_bot2` is not a mention of `smartai_bot`.
fn mention_ranges(text: &str, bot_username: &str) -> Vec<Range<usize>> {
    if bot_username.is_empty() {
        return Vec::new();
    }
    let bytes = text.as_bytes();
    text.match_indices('@')
        .filter_map(|(start, _)| {
            let end = start + 1 + bot_username.len();
            let name = bytes.get(start + 1..end)?;
            if !name.eq_ignore_ascii_case(bot_username.as_bytes()) {
                return None;
            }
            let at_boundary = bytes
                .get(end)
                .map_or(true, |b| !(b.is_ascii_alphanumeric() || *b == b'_'));
            at_boundary.then_some(start..end)
        })
        .collect()
}

/// Returns true if `text` contains a @mention of the given bot username.
#[inline]
pub fn is_bot_mentioned(text: &str, bot_username: &str) -> bool {
    !mention_ranges(text, bot_username).is_empty()
}

/// Strips the bot @mention tokens from `text` and returns the trimmed string.
pub fn extract_question(text: &str, bot_username: &str) -> String {
    let mut question = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in mention_ranges(text, bot_username) {
        question.push_str(&text[cursor..range.start]);
        cursor = range.end;
    }
    question.push_str(&text[cursor..]);
    question.trim().to_string()
}

/// True if the message replies to one of the bot's own messages.
///
/// Compares the replied-to author with the bot id when both are known; falls back to the
/// replied-to message being written by some bot when the bot id is unknown.
pub fn is_reply_to_bot(message: &Message, bot_id: Option<i64>) -> bool {
    if message.reply_to_message_id.is_none() {
        return false;
    }
    match (message.reply_to_user_id, bot_id) {
        (Some(author), Some(bot)) => author == bot,
        _ => message.reply_to_message_from_bot,
    }
}

/// True if the message (text or caption) @mentions the bot or replies to it.
pub fn is_addressed_to_bot(message: &Message, identity: &BotIdentity) -> bool {
    if is_reply_to_bot(message, identity.id) {
        return true;
    }
    identity
        .username
        .as_deref()
        .is_some_and(|username| is_bot_mentioned(&message.content, username))
}

/// True unless the command names another bot with a `/cmd@botname` suffix. Unsuffixed commands
/// are for every bot in the chat; with no known username every command is accepted.
pub fn is_command_for_bot(target: Option<&str>, identity: &BotIdentity) -> bool {
    match (target, identity.username.as_deref()) {
        (Some(target), Some(username)) => target.eq_ignore_ascii_case(username),
        _ => true,
    }
}

/// Text to send to the model: the content with the bot mention stripped, or `empty_default`
/// when nothing is left.
pub fn question_text(content: &str, bot_username: Option<&str>, empty_default: &str) -> String {
    let question = match bot_username {
        Some(username) => extract_question(content, username),
        None => content.trim().to_string(),
    };
    if question.is_empty() {
        empty_default.to_string()
    } else {
        question
    }
}
