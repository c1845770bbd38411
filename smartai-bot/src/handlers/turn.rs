//! One conversation turn against the model: history in, reply out, history committed on success.

use conversation_store::ConversationStore;
use llm_client::LlmClient;
use prompt::{build_request_messages, ChatMessage};
use smartai_core::{Bot as CoreBot, HandlerError, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{error, info};

use super::replies::error_reply;
use crate::keyboard::main_keyboard;

/// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
pub(crate) fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            error!(cause = %cause, "{}", first_msg);
        } else {
            error!(cause = %cause, "Caused by");
        }
    }
}

/// Shared by the text and photo handlers.
pub struct TurnRunner {
    llm_client: Arc<dyn LlmClient>,
    store: Arc<dyn ConversationStore>,
    bot: Arc<dyn CoreBot>,
    system_prompt: String,
}

impl TurnRunner {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        store: Arc<dyn ConversationStore>,
        bot: Arc<dyn CoreBot>,
        system_prompt: String,
    ) -> Self {
        Self {
            llm_client,
            store,
            bot,
            system_prompt,
        }
    }

    pub(crate) fn bot(&self) -> &Arc<dyn CoreBot> {
        &self.bot
    }

    /// Sends `[system] + last K-1 history entries + user_entry` to the model. On success commits
    /// the user and assistant entries and replies with the keyboard; on failure replies with the
    /// error and leaves history untouched.
    pub async fn run(&self, message: &Message, user_entry: ChatMessage) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let history = self.store.read(user_id).await;
        // The model sees at most K entries including the current one.
        let keep = self.store.max_history().saturating_sub(1);
        let window = &history[history.len().saturating_sub(keep)..];
        let messages = build_request_messages(&self.system_prompt, window, user_entry.clone());

        info!(
            user_id,
            chat_id = message.chat.id,
            history_len = window.len(),
            question = %user_entry.content.preview(80),
            "step: submitting turn to LLM"
        );

        let answer = match self.llm_client.complete(messages).await {
            Ok(answer) if answer.trim().is_empty() => {
                let e = anyhow::Error::new(HandlerError::EmptyContent);
                return self.fail(message, &e).await;
            }
            Ok(answer) => answer,
            Err(e) => return self.fail(message, &e).await,
        };

        self.store
            .append_turn(user_id, user_entry, ChatMessage::assistant(answer.clone()))
            .await;

        self.bot
            .send_message_with_keyboard(&message.chat, &answer, &main_keyboard())
            .await?;
        info!(user_id, reply_len = answer.len(), "LLM response sent");

        Ok(HandlerResponse::Reply(answer))
    }

    /// Reports an external failure to the user and stops the chain.
    pub(crate) async fn fail(&self, message: &Message, e: &anyhow::Error) -> Result<HandlerResponse> {
        log_error_chain(e, "LLM turn failed");
        self.bot.send_message(&message.chat, &error_reply(e)).await?;
        Ok(HandlerResponse::Stop)
    }
}
