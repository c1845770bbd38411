//! Text messages: one model turn with the user's history.

use async_trait::async_trait;
use prompt::ChatMessage;
use smartai_core::{Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::instrument;

use super::turn::TurnRunner;
use crate::mention::{question_text, SharedIdentity, DEFAULT_EMPTY_MENTION_PROMPT};

pub struct ChatHandler {
    turn: Arc<TurnRunner>,
    identity: SharedIdentity,
}

impl ChatHandler {
    pub fn new(turn: Arc<TurnRunner>, identity: SharedIdentity) -> Self {
        Self { turn, identity }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text {
            return Ok(HandlerResponse::Continue);
        }
        let username = self.identity.read().await.username.clone();
        let question = question_text(
            &message.content,
            username.as_deref(),
            DEFAULT_EMPTY_MENTION_PROMPT,
        );
        self.turn.run(message, ChatMessage::user(question)).await
    }
}
