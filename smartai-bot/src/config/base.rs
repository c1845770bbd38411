//! Base config: Telegram connection, update transport, health port, logging. Loaded from env.

use anyhow::Result;
use clap::ValueEnum;
use smartai_core::BotError;

use super::env::{first_non_empty, flag_or, parse_or, required};

/// How updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Long polling (`getUpdates`); health server runs alongside.
    Polling,
    /// Telegram pushes updates to `https://{host}/webhook/{token}`.
    Webhook,
}

/// Base config: Telegram-related, transport and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// PUBLIC_HOSTNAME or RENDER_EXTERNAL_HOSTNAME; enables webhook mode by default
    pub public_hostname: Option<String>,
    /// PORT for the HTTP server (health, and webhook when enabled)
    pub port: u16,
    /// GROUP_REQUIRE_MENTION: in groups only answer @mentions and replies to the bot
    pub group_require_mention: bool,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token.filter(|t| !t.trim().is_empty()) {
            Some(t) => t,
            None => required(&["BOT_TOKEN", "TELEGRAM_BOT_TOKEN"])?,
        };
        let telegram_api_url = first_non_empty(&["TELEGRAM_API_URL", "TELOXIDE_API_URL"]);
        let public_hostname = first_non_empty(&["PUBLIC_HOSTNAME", "RENDER_EXTERNAL_HOSTNAME"]);
        let port = parse_or("PORT", 3000u16)?;
        let group_require_mention = flag_or("GROUP_REQUIRE_MENTION", true)?;
        let log_file = first_non_empty(&["LOG_FILE"]);

        Ok(Self {
            bot_token,
            telegram_api_url,
            public_hostname,
            port,
            group_require_mention,
            log_file,
        })
    }

    /// Validate config (telegram_api_url must be a valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                return Err(BotError::Config(format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Transport to use: explicit choice wins; otherwise webhook when a public hostname is set.
    pub fn resolve_transport(&self, requested: Option<Transport>) -> Result<Transport> {
        let transport = requested.unwrap_or(if self.public_hostname.is_some() {
            Transport::Webhook
        } else {
            Transport::Polling
        });
        if transport == Transport::Webhook && self.public_hostname.is_none() {
            return Err(BotError::Config(
                "webhook transport requires PUBLIC_HOSTNAME (or RENDER_EXTERNAL_HOSTNAME)".to_string(),
            )
            .into());
        }
        Ok(transport)
    }

    /// Path Telegram posts updates to.
    pub fn webhook_path(&self) -> String {
        format!("/webhook/{}", self.bot_token)
    }

    /// Public webhook URL, when a hostname is configured. A bare host gets the `https://` scheme.
    pub fn webhook_url(&self) -> Option<String> {
        self.public_hostname.as_ref().map(|host| {
            let host = host.trim_end_matches('/');
            if host.starts_with("http://") || host.starts_with("https://") {
                format!("{}{}", host, self.webhook_path())
            } else {
                format!("https://{}{}", host, self.webhook_path())
            }
        })
    }
}
