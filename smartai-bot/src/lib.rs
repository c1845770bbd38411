//! # SmartAI bot application
//!
//! Telegram relay bot: wires the handler chain, conversation store, LLM and image clients.
//! Loads config from env and dispatches updates over long polling or a webhook, with a health
//! endpoint alongside.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod health;
pub mod keyboard;
pub mod mention;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{AiConfig, BaseConfig, BotConfig, Transport};
pub use keyboard::{main_keyboard, Action};
pub use mention::{
    extract_question, is_addressed_to_bot, is_bot_mentioned, is_command_for_bot, is_reply_to_bot,
    question_text, BotIdentity, SharedIdentity,
};
pub use runner::run_bot;
