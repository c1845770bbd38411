//! Photos: download the largest size, send it inline (base64 data URL) with the caption as question.

use async_trait::async_trait;
use prompt::{image_data_url, ChatMessage};
use smartai_core::{Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use super::turn::TurnRunner;
use crate::mention::{question_text, SharedIdentity, DEFAULT_PHOTO_QUESTION};

/// Telegram re-encodes photos as JPEG.
const PHOTO_MIME_TYPE: &str = "image/jpeg";

pub struct PhotoHandler {
    turn: Arc<TurnRunner>,
    identity: SharedIdentity,
}

impl PhotoHandler {
    pub fn new(turn: Arc<TurnRunner>, identity: SharedIdentity) -> Self {
        Self { turn, identity }
    }
}

#[async_trait]
impl Handler for PhotoHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessageKind::Photo { file_id } = &message.kind else {
            return Ok(HandlerResponse::Continue);
        };

        let bytes = match self.turn.bot().download_file(file_id).await {
            Ok(bytes) => bytes,
            Err(e) => return self.turn.fail(message, &anyhow::Error::new(e)).await,
        };
        info!(
            user_id = message.user.id,
            size_bytes = bytes.len(),
            "step: photo downloaded"
        );

        let username = self.identity.read().await.username.clone();
        let question = question_text(&message.content, username.as_deref(), DEFAULT_PHOTO_QUESTION);
        let entry = ChatMessage::user_image(Some(question), image_data_url(&bytes, PHOTO_MIME_TYPE));
        self.turn.run(message, entry).await
    }
}
