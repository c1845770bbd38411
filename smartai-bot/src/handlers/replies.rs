//! User-facing texts.

pub const WELCOME: &str = "Привет! Я SmartAI-бот 🤖";
pub const ABOUT: &str = "Я AI-бот с памятью и изображениями 🤖";
pub const MEMORY_CLEARED: &str = "🧹 Память очищена";
pub const GENERATED_IMAGE_CAPTION: &str = "🎨 Готово!";

/// Reply sent when an external call fails: the error text, verbatim.
pub fn error_reply(error: &impl std::fmt::Display) -> String {
    format!("Ошибка: {}", error)
}
