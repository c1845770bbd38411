//! # smartai-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], incoming events ([`Message`],
//! [`MessageKind`]), [`InlineKeyboard`], errors, and tracing initialization.
//! Transport-agnostic; the Telegram implementation lives in `smartai-bot`.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, InlineKeyboard, KeyboardButton, Message, MessageKind,
    ToCoreMessage, ToCoreUser, User,
};
