//! Chat identity type for core events.

use serde::{Deserialize, Serialize};

/// Chat identity. `chat_type` is one of `private`, `group`, `supergroup`, `channel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// True for multi-user chats (`group` and `supergroup`), where replies are gated.
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_group() {
        let chat = |t: &str| Chat {
            id: 1,
            chat_type: t.to_string(),
        };
        assert!(chat("group").is_group());
        assert!(chat("supergroup").is_group());
        assert!(!chat("private").is_group());
        assert!(!chat("channel").is_group());
    }
}
