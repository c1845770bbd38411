//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{BotConfig, Transport};

#[derive(Parser)]
#[command(name = "smartai-bot")]
#[command(about = "SmartAI Telegram relay bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Update transport; defaults to webhook when PUBLIC_HOSTNAME is set, else polling.
        #[arg(long, value_enum)]
        transport: Option<Transport>,
    },
}

/// Load and validate BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    let config = BotConfig::load(token)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_transport() {
        let cli = Cli::try_parse_from(["smartai-bot", "run", "--token", "t", "--transport", "webhook"]).unwrap();
        match cli.command {
            Commands::Run { token, transport } => {
                assert_eq!(token.as_deref(), Some("t"));
                assert_eq!(transport, Some(Transport::Webhook));
            }
        }
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["smartai-bot", "run"]).unwrap();
        match cli.command {
            Commands::Run { token, transport } => {
                assert!(token.is_none());
                assert!(transport.is_none());
            }
        }
    }

    #[test]
    fn test_rejects_unknown_transport() {
        assert!(Cli::try_parse_from(["smartai-bot", "run", "--transport", "carrier-pigeon"]).is_err());
    }
}
