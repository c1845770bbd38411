//! Addressee gate: in groups, text and photos reach the model only when addressed to the bot;
//! commands suffixed with another bot's name are dropped everywhere.

use async_trait::async_trait;
use smartai_core::{Handler, Message, MessageKind, Result};
use tracing::{debug, instrument};

use crate::mention::{is_addressed_to_bot, is_command_for_bot, SharedIdentity};

/// Stops the chain in `before` for group text/photo events that neither @mention the bot nor
/// reply to it, and for `/cmd@otherbot` commands in any chat. Button presses always pass.
pub struct GroupGateHandler {
    identity: SharedIdentity,
    require_mention: bool,
}

impl GroupGateHandler {
    pub fn new(identity: SharedIdentity, require_mention: bool) -> Self {
        Self {
            identity,
            require_mention,
        }
    }
}

#[async_trait]
impl Handler for GroupGateHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if let MessageKind::Command { target, .. } = &message.kind {
            let identity = self.identity.read().await;
            let for_us = is_command_for_bot(target.as_deref(), &identity);
            if !for_us {
                debug!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    target = ?target,
                    "step: command addressed to another bot, dropped"
                );
            }
            return Ok(for_us);
        }
        if !self.require_mention || !message.chat.is_group() {
            return Ok(true);
        }
        if !matches!(message.kind, MessageKind::Text | MessageKind::Photo { .. }) {
            return Ok(true);
        }
        let identity = self.identity.read().await;
        let addressed = is_addressed_to_bot(message, &identity);
        if !addressed {
            debug!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                "step: group message not addressed to bot, dropped"
            );
        }
        Ok(addressed)
    }
}
