//! Core types: user, chat, incoming event, keyboard, handler response, and Handler trait.
//!
//! One file per main type.

mod chat;
mod handler;
mod keyboard;
mod message;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use keyboard::{InlineKeyboard, KeyboardButton};
pub use message::{Message, MessageKind};
pub use response::HandlerResponse;
pub use user::User;
