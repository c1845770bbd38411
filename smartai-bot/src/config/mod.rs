//! Bot configuration: BaseConfig (Telegram, transport, log) + AiConfig (chat model, memory, images).

mod ai;
mod base;
mod bot_config;
mod env;


pub use ai::AiConfig;
pub use base::{BaseConfig, Transport};
pub use bot_config::BotConfig;
