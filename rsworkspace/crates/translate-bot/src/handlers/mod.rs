//! Serenity event handler implementation

use std::sync::Arc;

use serenity::all::{ActivityData, Message, Reaction, Ready};
use serenity::async_trait;
use serenity::prelude::*;
use tracing::{debug, error, info};
use translate_types::ReactionEvent;

use crate::commands::CommandRunner;
use crate::errors::{classify, log_swallowed};
use crate::health::AppState;
use crate::platform::DiscordPlatform;
use crate::relay::Relay;

/// Everything the handler needs, stored in the client's TypeMap.
#[derive(Clone)]
pub struct BotState {
    pub relay: Arc<Relay<DiscordPlatform>>,
    pub commands: CommandRunner,
    pub health: AppState,
    pub activity: String,
}

impl TypeMapKey for BotState {
    type Value = BotState;
}

pub struct Handler;

async fn bot_state(ctx: &Context) -> Option<BotState> {
    let data = ctx.data.read().await;
    let state = data.get::<BotState>().cloned();
    if state.is_none() {
        error!("BotState not found in context data");
    }
    state
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "Discord bot connected as {} ({} guilds)",
            ready.user.name,
            ready.guilds.len()
        );

        let Some(state) = bot_state(&ctx).await else {
            return;
        };
        state.health.set_bot_username(ready.user.name.clone()).await;
        ctx.set_activity(Some(ActivityData::playing(state.activity.clone())));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Commands are guild-only; DMs and bots are ignored.
        if msg.author.bot || msg.guild_id.is_none() {
            return;
        }

        let Some(state) = bot_state(&ctx).await else {
            return;
        };
        if !msg.content.starts_with(state.commands.prefix()) {
            return;
        }
        let Some(reply) = state.commands.run(msg.author.id.get(), &msg.content).await else {
            return;
        };

        if reply.acknowledge {
            if let Err(e) = msg.react(&ctx, '✅').await {
                log_swallowed("Failed to acknowledge command", &classify(&e));
            }
        }

        let sent = match msg.channel_id.say(&ctx.http, &reply.text).await {
            Ok(sent) => sent,
            Err(e) => {
                log_swallowed("Failed to send command reply", &classify(&e));
                return;
            }
        };

        if let Some(ttl) = reply.delete_after {
            let http = ctx.http.clone();
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                if let Err(e) = sent.channel_id.delete_message(&http, sent.id).await {
                    log_swallowed("Failed to delete command reply", &classify(&e));
                }
            });
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
            return;
        };
        let bot_id = ctx.cache.current_user().id;
        if user_id == bot_id {
            return;
        }

        let Some(state) = bot_state(&ctx).await else {
            return;
        };

        let reactor_is_bot = match reaction.user(&ctx).await {
            Ok(user) => user.bot,
            Err(e) => {
                debug!("Could not resolve reactor {}: {}", user_id, e);
                false
            }
        };

        let event = ReactionEvent::new(
            reaction.message_id.get(),
            reaction.channel_id.get(),
            Some(guild_id.get()),
            user_id.get(),
            reaction.emoji.to_string(),
        )
        .from_bot(reactor_is_bot);

        let outcome = state.relay.handle(event).await;
        debug!(message_id = %reaction.message_id, ?outcome, "Reaction handled");
    }
}
