//! Component factory: builds clients, store and handler chain from config. Isolates assembly
//! logic from the runner so tests can assemble the same chain around mocks.

use conversation_store::{ConversationStore, InMemoryConversationStore};
use handler_chain::HandlerChain;
use image_generation_client::{ImageGenerationClient, ImageGenerator};
use llm_client::{LlmClient, OpenAILlmClient};
use smartai_core::Bot as CoreBot;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::{
    ActionHandler, ChatHandler, GroupGateHandler, PhotoHandler, StartHandler, TurnRunner,
};
use crate::mention::SharedIdentity;
use crate::telegram::TelegramBotAdapter;

/// Dependencies of the handler chain.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn CoreBot>,
    pub identity: SharedIdentity,
    pub store: Arc<dyn ConversationStore>,
    pub llm_client: Arc<dyn LlmClient>,
    pub image_generator: Arc<dyn ImageGenerator>,
}

/// teloxide Bot with the optional custom API URL applied.
pub fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds the production components around `teloxide_bot`.
#[instrument(skip(config, teloxide_bot))]
pub fn build_bot_components(config: &BotConfig, teloxide_bot: teloxide::Bot) -> BotComponents {
    let ai = config.ai();
    let llm_client: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(ai.openai_api_key.clone(), ai.openai_base_url.clone())
            .with_model(ai.model.clone())
            .with_vision_model_opt(ai.vision_model.clone())
            .with_max_tokens(Some(ai.max_tokens)),
    );
    let image_generator: Arc<dyn ImageGenerator> = Arc::new(
        ImageGenerationClient::with_base_url(ai.openai_api_key.clone(), ai.openai_base_url.clone())
            .with_model(ai.image_model.clone()),
    );
    let store: Arc<dyn ConversationStore> =
        Arc::new(InMemoryConversationStore::with_max_history(ai.max_history));

    info!(
        model = %ai.model,
        vision_model = ?ai.vision_model,
        image_model = %ai.image_model,
        max_history = ai.max_history,
        "Components built"
    );

    BotComponents {
        bot: Arc::new(TelegramBotAdapter::new(teloxide_bot)),
        identity: SharedIdentity::default(),
        store,
        llm_client,
        image_generator,
    }
}

/// Builds the handler chain: group gate → /start → actions → text → photo.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let turn = Arc::new(TurnRunner::new(
        components.llm_client.clone(),
        components.store.clone(),
        components.bot.clone(),
        config.ai().system_prompt.clone(),
    ));

    HandlerChain::new()
        .add_handler(Arc::new(GroupGateHandler::new(
            components.identity.clone(),
            config.base().group_require_mention,
        )))
        .add_handler(Arc::new(StartHandler::new(components.bot.clone())))
        .add_handler(Arc::new(ActionHandler::new(
            components.bot.clone(),
            components.store.clone(),
            components.image_generator.clone(),
            config.ai().image_prompt.clone(),
        )))
        .add_handler(Arc::new(ChatHandler::new(
            turn.clone(),
            components.identity.clone(),
        )))
        .add_handler(Arc::new(PhotoHandler::new(turn, components.identity.clone())))
}
