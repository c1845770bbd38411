//! # Conversation store
//!
//! Per-user conversation history bounded to the most recent K entries.
//!
//! [`ConversationStore`] is the contract handlers depend on (`append` / `read` / `clear`);
//! [`InMemoryConversationStore`] is the process-local implementation. Histories live for the
//! lifetime of the process; nothing is persisted.

mod inmemory;

pub use inmemory::InMemoryConversationStore;

use async_trait::async_trait;
use prompt::ChatMessage;

/// Default maximum number of retained history entries per user.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Keyed, bounded history store. All operations are infallible and atomic per call.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Appends `message` to the user's history, then drops the oldest entries beyond the bound.
    async fn append(&self, user_id: i64, message: ChatMessage);

    /// Appends a completed turn (user entry, then assistant entry) under one lock, truncating after each push.
    async fn append_turn(&self, user_id: i64, user_message: ChatMessage, assistant_message: ChatMessage);

    /// Returns the user's history, oldest first; empty when the user has never been seen.
    async fn read(&self, user_id: i64) -> Vec<ChatMessage>;

    /// Resets the user's history to empty. Other users are untouched.
    async fn clear(&self, user_id: i64);

    /// Number of distinct users with a history entry (including cleared ones).
    async fn user_count(&self) -> usize;

    /// The per-user bound K.
    fn max_history(&self) -> usize;
}
