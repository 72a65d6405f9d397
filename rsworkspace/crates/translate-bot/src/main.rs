//! Emoji translation bot for Discord
//!
//! Translates a message when a user reacts to it with an emoji bound to a
//! language, delivering the result by DM or as a short-lived reply depending
//! on the channel's configuration.

mod commands;
mod config;
mod dedup;
mod errors;
mod handlers;
mod health;
mod json_file;
mod owners;
mod platform;
mod policy_store;
mod relay;
mod stats;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use llm_translate::{
    DeepLTranslator, OpenAiConfig, OpenAiTranslator, TranslationChain, TranslationProvider,
};
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use translate_types::EmojiLanguageMap;

use crate::commands::CommandRunner;
use crate::config::Config;
use crate::handlers::{BotState, Handler};
use crate::health::AppState;
use crate::owners::OwnerList;
use crate::platform::DiscordPlatform;
use crate::policy_store::PolicyStore;
use crate::relay::Relay;

/// Emoji translation bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/translate-bot.toml")]
    config: String,

    /// Discord bot token (overrides config file)
    #[arg(long, env = "DISCORD_BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// DeepL API key (overrides config file)
    #[arg(long, env = "DEEPL_API_KEY", hide_env_values = true)]
    deepl_api_key: Option<String>,

    /// OpenAI API key (overrides config file, enables the primary translator)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Health check server port
    #[arg(long, env = "HEALTH_CHECK_PORT", default_value = "3001")]
    health_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translate_bot=debug,llm_translate=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting translate bot");

    let args = Args::parse();
    let config = load_config(&args)?;
    config.validate()?;

    let emoji = Arc::new(load_emoji_map(&config.storage.emoji_config)?);
    if emoji.is_empty() {
        warn!("No emoji bindings loaded; reactions will never trigger a translation");
    } else {
        info!(
            "Loaded {} emoji binding(s) for {} language(s)",
            emoji.len(),
            emoji.languages().len()
        );
    }

    let owners = OwnerList::load(&config.storage.whitelist)?;
    if owners.owners().await.is_empty() {
        warn!(
            "Whitelist {} is empty; admin commands are disabled",
            config.storage.whitelist.display()
        );
    }
    let policies = PolicyStore::new(&config.storage.channel_config);
    // Surface a broken policy file at startup rather than on the first reaction.
    if let Err(e) = policies.load() {
        warn!(
            "Channel config {} is unreadable: {:#}",
            policies.path().display(),
            e
        );
    }

    let chain = build_chain(&config)?;

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord.bot_token, intents)
        .event_handler(Handler)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Discord client: {}", e))?;

    let platform = Arc::new(DiscordPlatform::new(
        client.http.clone(),
        client.cache.clone(),
    ));
    let relay = Relay::new(platform, chain, emoji.clone(), policies.clone());
    let health_state = AppState::new(relay.stats().clone());

    {
        let mut data = client.data.write().await;
        data.insert::<BotState>(BotState {
            relay: Arc::new(relay),
            commands: CommandRunner::new(
                config.discord.command_prefix.clone(),
                owners,
                policies,
                emoji,
            ),
            health: health_state.clone(),
            activity: config.discord.activity.clone(),
        });
    }

    let health_port = args.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_state, health_port).await {
            error!("Health server error: {}", e);
        }
    });

    // Graceful shutdown: close all shards on SIGTERM or Ctrl+C.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("Shutdown signal received, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord gateway connection...");

    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Discord client error: {}", e))?;

    info!("Translate bot stopped");
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = if Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, loading from environment");
        Config::from_env()?
    };

    if let Some(bot_token) = &args.bot_token {
        config.discord.bot_token = bot_token.clone();
    }
    if let Some(key) = &args.deepl_api_key {
        config.translation.deepl.api_key = key.clone();
    }
    if let Some(key) = args.openai_api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        match config.translation.openai.as_mut() {
            Some(openai) => openai.api_key = key.clone(),
            None => config.translation.openai = Some(OpenAiConfig::new(key.clone())),
        }
    }

    Ok(config)
}

fn load_emoji_map(path: &Path) -> Result<EmojiLanguageMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read emoji config: {}", path.display()))?;
    EmojiLanguageMap::from_json(&content)
        .with_context(|| format!("Failed to parse emoji config: {}", path.display()))
}

fn build_chain(config: &Config) -> Result<TranslationChain> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.translation.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let primary: Option<Arc<dyn TranslationProvider>> = match &config.translation.openai {
        Some(openai) => {
            info!("Primary translator: {} via {}", openai.model, openai.base_url);
            Some(Arc::new(OpenAiTranslator::new(http.clone(), openai.clone())))
        }
        None => {
            info!("OpenAI not configured; using DeepL only");
            None
        }
    };
    let secondary = Arc::new(DeepLTranslator::new(http, config.translation.deepl.clone()));

    Ok(TranslationChain::new(primary, secondary))
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
    }
}
