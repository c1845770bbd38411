//! Inline keyboard actions and the fixed keyboard attached to bot replies.

use smartai_core::{HandlerError, InlineKeyboard, KeyboardButton};

pub const LABEL_CLEAR: &str = "🧹 Очистить память";
pub const LABEL_ABOUT: &str = "ℹ️ О боте";
pub const LABEL_GENERATE_IMAGE: &str = "🎨 Сгенерировать картинку";

/// Fixed actions reachable from the keyboard (and the matching commands).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Clear,
    About,
    GenerateImage,
}

impl Action {
    /// Callback data carried by the button.
    pub fn callback_data(self) -> &'static str {
        match self {
            Action::Clear => "clear",
            Action::About => "about",
            Action::GenerateImage => "generate_image",
        }
    }

    /// Parses button callback data.
    pub fn from_callback_data(data: &str) -> Result<Self, HandlerError> {
        match data {
            "clear" => Ok(Action::Clear),
            "about" => Ok(Action::About),
            "generate_image" => Ok(Action::GenerateImage),
            other => Err(HandlerError::UnknownAction(other.to_string())),
        }
    }

    /// Command name (without `/`) that triggers the same action.
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "clear" => Some(Action::Clear),
            "about" => Some(Action::About),
            "image" => Some(Action::GenerateImage),
            _ => None,
        }
    }
}

/// Keyboard attached to the welcome message and every model reply.
pub fn main_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(vec![
        vec![
            KeyboardButton::callback(LABEL_CLEAR, Action::Clear.callback_data()),
            KeyboardButton::callback(LABEL_ABOUT, Action::About.callback_data()),
        ],
        vec![KeyboardButton::callback(
            LABEL_GENERATE_IMAGE,
            Action::GenerateImage.callback_data(),
        )],
    ])
}
