//! `/start`: welcome text with the main keyboard.

use async_trait::async_trait;
use smartai_core::{Bot as CoreBot, Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use super::replies::WELCOME;
use crate::keyboard::main_keyboard;

pub struct StartHandler {
    bot: Arc<dyn CoreBot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &message.kind {
            MessageKind::Command { name, .. } if name == "start" => {
                self.bot
                    .send_message_with_keyboard(&message.chat, WELCOME, &main_keyboard())
                    .await?;
                info!(user_id = message.user.id, "Welcome sent");
                Ok(HandlerResponse::Stop)
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
