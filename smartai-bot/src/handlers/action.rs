//! Keyboard actions (and their commands): clear memory, about, generate image.

use async_trait::async_trait;
use conversation_store::ConversationStore;
use image_generation_client::ImageGenerator;
use smartai_core::{Bot as CoreBot, Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::replies::{error_reply, ABOUT, GENERATED_IMAGE_CAPTION, MEMORY_CLEARED};
use super::turn::log_error_chain;
use crate::keyboard::Action;

/// Handles [`Action`]s from button presses and from `/clear`, `/about`, `/image`.
///
/// Button presses edit the message carrying the keyboard; commands answer with a new message.
pub struct ActionHandler {
    bot: Arc<dyn CoreBot>,
    store: Arc<dyn ConversationStore>,
    image_generator: Arc<dyn ImageGenerator>,
    image_prompt: String,
}

impl ActionHandler {
    pub fn new(
        bot: Arc<dyn CoreBot>,
        store: Arc<dyn ConversationStore>,
        image_generator: Arc<dyn ImageGenerator>,
        image_prompt: String,
    ) -> Self {
        Self {
            bot,
            store,
            image_generator,
            image_prompt,
        }
    }

    /// Sends `text` as the acknowledgment: edit of the keyboard message when known, else a new message.
    async fn acknowledge(&self, message: &Message, edit_target: Option<&str>, text: &str) -> Result<()> {
        match edit_target {
            Some(message_id) => self.bot.edit_message(&message.chat, message_id, text).await,
            None => self.bot.send_message(&message.chat, text).await,
        }
    }

    async fn run(&self, message: &Message, action: Action, edit_target: Option<&str>) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        info!(user_id, action = ?action, "step: action");
        match action {
            Action::Clear => {
                self.store.clear(user_id).await;
                self.acknowledge(message, edit_target, MEMORY_CLEARED).await?;
            }
            Action::About => {
                self.acknowledge(message, edit_target, ABOUT).await?;
            }
            Action::GenerateImage => match self.image_generator.generate_image(&self.image_prompt).await {
                Ok(url) => {
                    self.bot
                        .send_photo(&message.chat, &url, Some(GENERATED_IMAGE_CAPTION))
                        .await?;
                    info!(user_id, image_url = %url, "Generated image sent");
                }
                Err(e) => {
                    log_error_chain(&e, "Image generation failed");
                    self.bot.send_message(&message.chat, &error_reply(&e)).await?;
                }
            },
        }
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for ActionHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &message.kind {
            MessageKind::Callback { data, message_id } => match Action::from_callback_data(data) {
                Ok(action) => self.run(message, action, message_id.as_deref()).await,
                Err(e) => {
                    warn!(user_id = message.user.id, error = %e, "Ignoring button press");
                    Ok(HandlerResponse::Stop)
                }
            },
            MessageKind::Command { name, .. } => match Action::from_command(name) {
                Some(action) => self.run(message, action, None).await,
                None => Ok(HandlerResponse::Continue),
            },
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
