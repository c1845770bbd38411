//! Recording mocks for dispatch tests: bot, model and image generator.
//!
//! Every outbound call is recorded so tests can assert on exactly what the user would see.

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use conversation_store::{ConversationStore, InMemoryConversationStore};
use handler_chain::HandlerChain;
use image_generation_client::ImageGenerator;
use llm_client::LlmClient;
use prompt::ChatMessage;
use smartai_bot::{build_handler_chain, BotComponents, BotConfig, BotIdentity, SharedIdentity};
use smartai_core::{Bot, BotError, Chat, InlineKeyboard, Message, MessageKind, Result, User};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub const BOT_ID: i64 = 999;
pub const BOT_USERNAME: &str = "smartai_bot";

/// One outbound call made through [`MockBot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text {
        chat_id: i64,
        text: String,
    },
    TextWithKeyboard {
        chat_id: i64,
        text: String,
        keyboard: InlineKeyboard,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Photo {
        chat_id: i64,
        url: String,
        caption: Option<String>,
    },
}

impl Outbound {
    pub fn text(&self) -> Option<&str> {
        match self {
            Outbound::Text { text, .. }
            | Outbound::TextWithKeyboard { text, .. }
            | Outbound::Edit { text, .. } => Some(text),
            Outbound::Photo { .. } => None,
        }
    }
}

/// Records outbound calls; `download_file` returns fixed bytes or fails.
pub struct MockBot {
    sent: Mutex<Vec<Outbound>>,
    download: Option<Vec<u8>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            download: Some(b"fake-jpeg".to_vec()),
        })
    }

    pub fn failing_download() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            download: None,
        })
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, outbound: Outbound) {
        self.sent.lock().unwrap().push(outbound);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Outbound::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<()> {
        self.record(Outbound::TextWithKeyboard {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(Outbound::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, image_url: &str, caption: Option<&str>) -> Result<()> {
        self.record(Outbound::Photo {
            chat_id: chat.id,
            url: image_url.to_string(),
            caption: caption.map(str::to_string),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.download
            .clone()
            .ok_or_else(|| BotError::Bot(format!("file {} not found", file_id)))
    }
}

/// Scripted model: pops one reply per call (`Err` text becomes an error) and records requests.
/// Answers "ok" when the script is exhausted.
pub struct MockLlm {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlm {
    pub fn new(script: Vec<std::result::Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Ok("ok".to_string()),
        }
    }
}

/// Returns a fixed URL, or fails when built with `failing()`.
pub struct MockImageGenerator {
    url: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockImageGenerator {
    pub fn returning(url: &str) -> Arc<Self> {
        Arc::new(Self {
            url: Some(url.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            url: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.url
            .clone()
            .ok_or_else(|| anyhow!("content policy violation"))
    }
}

/// Chain built exactly like production, around the mocks.
pub struct Harness {
    pub bot: Arc<MockBot>,
    pub llm: Arc<MockLlm>,
    pub images: Arc<MockImageGenerator>,
    pub store: Arc<InMemoryConversationStore>,
    pub chain: HandlerChain,
}

pub struct HarnessBuilder {
    bot: Arc<MockBot>,
    llm: Arc<MockLlm>,
    images: Arc<MockImageGenerator>,
    max_history: usize,
    identity: BotIdentity,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            bot: MockBot::new(),
            llm: MockLlm::new(vec![]),
            images: MockImageGenerator::returning("https://img.example/robot.png"),
            max_history: 10,
            identity: BotIdentity {
                id: Some(BOT_ID),
                username: Some(BOT_USERNAME.to_string()),
            },
        }
    }

    pub fn bot(mut self, bot: Arc<MockBot>) -> Self {
        self.bot = bot;
        self
    }

    pub fn llm(mut self, llm: Arc<MockLlm>) -> Self {
        self.llm = llm;
        self
    }

    pub fn images(mut self, images: Arc<MockImageGenerator>) -> Self {
        self.images = images;
        self
    }

    pub fn max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn build(self) -> Harness {
        let config = test_config();
        let store = Arc::new(InMemoryConversationStore::with_max_history(self.max_history));
        let identity: SharedIdentity = Arc::new(RwLock::new(self.identity));
        let store_dyn: Arc<dyn ConversationStore> = store.clone();
        let components = BotComponents {
            bot: self.bot.clone(),
            identity,
            store: store_dyn,
            llm_client: self.llm.clone(),
            image_generator: self.images.clone(),
        };
        let chain = build_handler_chain(&config, &components);
        Harness {
            bot: self.bot,
            llm: self.llm,
            images: self.images,
            store,
            chain,
        }
    }
}

/// Config with fixed values; built from env under a lock so tests never race on env vars.
fn test_config() -> BotConfig {
    static ENV_LOCK: Mutex<()> = Mutex::new(());
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var("OPENAI_API_KEY", "sk-test");
    std::env::set_var("SYSTEM_PROMPT", "You are a test assistant");
    std::env::set_var("IMAGE_PROMPT", "a friendly robot");
    std::env::remove_var("GROUP_REQUIRE_MENTION");
    BotConfig::load(Some("123:test-token".to_string())).expect("test config")
}

pub fn private_chat() -> Chat {
    Chat {
        id: 100,
        chat_type: "private".to_string(),
    }
}

pub fn group_chat() -> Chat {
    Chat {
        id: -500,
        chat_type: "group".to_string(),
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn text(user_id: i64, chat: Chat, content: &str) -> Message {
    Message::new("1", user(user_id), chat, MessageKind::from_text(content), content)
}

pub fn photo(user_id: i64, chat: Chat, caption: &str) -> Message {
    Message::new(
        "2",
        user(user_id),
        chat,
        MessageKind::Photo {
            file_id: "photo-file-id".to_string(),
        },
        caption,
    )
}

pub fn callback(user_id: i64, chat: Chat, data: &str, message_id: Option<&str>) -> Message {
    Message::new(
        "3",
        user(user_id),
        chat,
        MessageKind::Callback {
            data: data.to_string(),
            message_id: message_id.map(str::to_string),
        },
        "",
    )
}
