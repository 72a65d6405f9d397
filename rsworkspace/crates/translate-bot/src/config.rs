//! Configuration management for translate-bot

#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{Context, Result};
use llm_translate::{DeepLConfig, OpenAiConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordBotConfig,
    pub translation: TranslationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Discord connection and command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordBotConfig {
    /// Bot token from the Discord developer portal
    #[serde(default)]
    pub bot_token: String,
    /// Prefix for admin commands. Default: `"-"`.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// "Playing ..." status shown once connected
    #[serde(default = "default_activity")]
    pub activity: String,
}

/// Translation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Primary translator; omitted means DeepL only.
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
    pub deepl: DeepLConfig,
    /// Per-request timeout shared by both providers. Default: 30.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Paths of the JSON files the bot reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_channel_config")]
    pub channel_config: PathBuf,
    #[serde(default = "default_emoji_config")]
    pub emoji_config: PathBuf,
    #[serde(default = "default_whitelist")]
    pub whitelist: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            channel_config: default_channel_config(),
            emoji_config: default_emoji_config(),
            whitelist: default_whitelist(),
        }
    }
}

/// Source of environment variables.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_impl(&SystemEnv)
    }

    pub(crate) fn from_env_impl<E: ReadEnv>(env: &E) -> Result<Self> {
        let bot_token = env
            .var("DISCORD_BOT_TOKEN")
            .context("DISCORD_BOT_TOKEN not set")?;
        let deepl_key = env.var("DEEPL_API_KEY").context("DEEPL_API_KEY not set")?;

        let openai = env
            .var("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(|key| -> Result<OpenAiConfig> {
                let mut openai = OpenAiConfig::new(key);
                if let Some(model) = env.var("OPENAI_MODEL") {
                    openai.model = model;
                }
                if let Some(temperature) = env.var("OPENAI_TEMPERATURE") {
                    openai.temperature = temperature
                        .parse()
                        .with_context(|| format!("Invalid OPENAI_TEMPERATURE: {}", temperature))?;
                }
                if let Some(base_url) = env.var("OPENAI_BASE_URL") {
                    openai.base_url = base_url;
                }
                Ok(openai)
            })
            .transpose()?;

        let mut deepl = DeepLConfig::new(deepl_key);
        if let Some(base_url) = env.var("DEEPL_BASE_URL") {
            deepl.base_url = base_url;
        }

        let request_timeout_secs = match env.var("TRANSLATE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid TRANSLATE_REQUEST_TIMEOUT_SECS: {}", raw))?,
            None => default_request_timeout_secs(),
        };

        Ok(Config {
            discord: DiscordBotConfig {
                bot_token,
                command_prefix: env
                    .var("COMMAND_PREFIX")
                    .unwrap_or_else(default_command_prefix),
                activity: env.var("BOT_ACTIVITY").unwrap_or_else(default_activity),
            },
            translation: TranslationConfig {
                openai,
                deepl,
                request_timeout_secs,
            },
            storage: StorageConfig {
                channel_config: env
                    .var("CHANNEL_CONFIG_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_channel_config),
                emoji_config: env
                    .var("EMOJI_CONFIG_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_emoji_config),
                whitelist: env
                    .var("WHITELIST_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_whitelist),
            },
        })
    }

    /// Fail early on settings that would only surface at the first reaction.
    pub fn validate(&self) -> Result<()> {
        if self.discord.bot_token.trim().is_empty() {
            anyhow::bail!("discord.bot_token is empty");
        }
        if self.translation.deepl.api_key.trim().is_empty() {
            anyhow::bail!("translation.deepl.api_key is empty");
        }
        if self.discord.command_prefix.is_empty() {
            anyhow::bail!("discord.command_prefix is empty");
        }
        if self.translation.request_timeout_secs == 0 {
            anyhow::bail!("translation.request_timeout_secs must be positive");
        }
        Ok(())
    }
}

fn default_command_prefix() -> String {
    "-".to_string()
}

fn default_activity() -> String {
    "Preparing for Translate...".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_channel_config() -> PathBuf {
    PathBuf::from("channel_config.json")
}

fn default_emoji_config() -> PathBuf {
    PathBuf::from("emoji_config.json")
}

fn default_whitelist() -> PathBuf {
    PathBuf::from("whitelist.json")
}
