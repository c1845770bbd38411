//! In-memory implementation of [`ConversationStore`].

use super::{ConversationStore, DEFAULT_MAX_HISTORY};
use async_trait::async_trait;
use prompt::ChatMessage;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

type HistoryMap = HashMap<i64, VecDeque<ChatMessage>>;

/// Process-local history store: `user_id → last K messages`, guarded by an async RwLock.
#[derive(Debug, Clone)]
pub struct InMemoryConversationStore {
    histories: Arc<RwLock<HistoryMap>>,
    max_history: usize,
}

impl InMemoryConversationStore {
    /// Creates a store with the default bound ([`DEFAULT_MAX_HISTORY`]).
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Creates a store keeping at most `max_history` entries per user. A bound of 0 is raised to 1.
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            histories: Arc::new(RwLock::new(HistoryMap::new())),
            max_history: max_history.max(1),
        }
    }

    fn push_bounded(history: &mut VecDeque<ChatMessage>, message: ChatMessage, max: usize) {
        history.push_back(message);
        while history.len() > max {
            history.pop_front();
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(&self, user_id: i64, message: ChatMessage) {
        let mut histories = self.histories.write().await;
        let history = histories.entry(user_id).or_default();
        Self::push_bounded(history, message, self.max_history);
        debug!(user_id, len = history.len(), "History entry appended");
    }

    async fn append_turn(&self, user_id: i64, user_message: ChatMessage, assistant_message: ChatMessage) {
        let mut histories = self.histories.write().await;
        let history = histories.entry(user_id).or_default();
        Self::push_bounded(history, user_message, self.max_history);
        Self::push_bounded(history, assistant_message, self.max_history);
        debug!(user_id, len = history.len(), "History turn appended");
    }

    async fn read(&self, user_id: i64) -> Vec<ChatMessage> {
        let histories = self.histories.read().await;
        histories
            .get(&user_id)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn clear(&self, user_id: i64) {
        let mut histories = self.histories.write().await;
        histories.entry(user_id).or_default().clear();
        info!(user_id, "History cleared");
    }

    async fn user_count(&self) -> usize {
        self.histories.read().await.len()
    }

    fn max_history(&self) -> usize {
        self.max_history
    }
}
