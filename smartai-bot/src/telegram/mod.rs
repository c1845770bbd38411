//! Telegram layer: adapters, Bot implementation, polling and webhook runners.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_inline_markup, TelegramBotAdapter};
pub use runner::{fetch_identity, run_polling, run_webhook};
