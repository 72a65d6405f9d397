//! Discord operations used by the relay
//!
//! [`RelayPlatform`] is the seam between the relay and serenity. The relay
//! only sees plain ids and strings; [`DiscordPlatform`] maps them onto the
//! REST API and classifies failures into [`PlatformError`].

#[path = "platform_tests.rs"]
mod platform_tests;

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    Cache, Channel, ChannelId, CreateMessage, EmojiId, GuildChannel, Http, MessageId,
    Permissions, ReactionType, UserId,
};
use tracing::debug;

use crate::errors::PlatformError;

/// What the relay needs to know about the reacted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageContext {
    pub content: String,
    pub guild_id: Option<u64>,
    /// Category of the channel; for threads, the parent channel's category.
    pub category_id: Option<u64>,
    /// Whether the bot holds Manage Messages in the channel.
    pub bot_can_manage_messages: bool,
}

/// Handle on a public reply, kept for its later deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedMessage {
    pub channel_id: u64,
    pub message_id: u64,
}

/// How a user's reaction gets removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPath {
    /// The bot removes it with its own Manage Messages permission.
    Moderator,
    /// The bot lacks the permission; attempt removal on the reactor's behalf.
    Reactor,
}

#[async_trait]
pub trait RelayPlatform: Send + Sync + 'static {
    async fn message_context(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<MessageContext, PlatformError>;

    async fn send_dm(&self, user_id: u64, text: &str) -> Result<(), PlatformError>;

    async fn send_reply(
        &self,
        channel_id: u64,
        message_id: u64,
        text: &str,
    ) -> Result<PostedMessage, PlatformError>;

    async fn remove_reaction(
        &self,
        path: RemovalPath,
        channel_id: u64,
        message_id: u64,
        user_id: u64,
        emoji: &str,
    ) -> Result<(), PlatformError>;

    async fn delete_message(&self, message: PostedMessage) -> Result<(), PlatformError>;
}

/// [`RelayPlatform`] backed by serenity's HTTP client and cache.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    async fn category_of(&self, channel: &GuildChannel) -> Option<u64> {
        if channel.thread_metadata.is_none() {
            return channel.parent_id.map(|id| id.get());
        }

        // A thread's parent_id is its text channel; the category sits one level up.
        let parent = channel.parent_id?;
        match self.http.get_channel(parent).await {
            Ok(Channel::Guild(parent)) => parent.parent_id.map(|id| id.get()),
            Ok(_) => None,
            Err(e) => {
                debug!("Failed to fetch thread parent {}: {}", parent, e);
                None
            }
        }
    }

    fn bot_can_manage_messages(&self, channel: &GuildChannel) -> bool {
        let bot_id = self.cache.current_user().id;
        match channel.permissions_for_user(&self.cache, bot_id) {
            Ok(perms) => perms.contains(Permissions::MANAGE_MESSAGES),
            Err(e) => {
                debug!(
                    "Could not compute permissions in channel {}: {}",
                    channel.id, e
                );
                false
            }
        }
    }
}

#[async_trait]
impl RelayPlatform for DiscordPlatform {
    async fn message_context(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<MessageContext, PlatformError> {
        let channel = ChannelId::new(channel_id);
        let message = self
            .http
            .get_message(channel, MessageId::new(message_id))
            .await?;

        let mut context = MessageContext {
            content: message.content,
            guild_id: message.guild_id.map(|id| id.get()),
            ..MessageContext::default()
        };

        if let Channel::Guild(guild_channel) = self.http.get_channel(channel).await? {
            context.guild_id = Some(guild_channel.guild_id.get());
            context.category_id = self.category_of(&guild_channel).await;
            context.bot_can_manage_messages = self.bot_can_manage_messages(&guild_channel);
        }

        Ok(context)
    }

    async fn send_dm(&self, user_id: u64, text: &str) -> Result<(), PlatformError> {
        UserId::new(user_id)
            .direct_message(&*self.http, CreateMessage::new().content(text))
            .await?;
        Ok(())
    }

    async fn send_reply(
        &self,
        channel_id: u64,
        message_id: u64,
        text: &str,
    ) -> Result<PostedMessage, PlatformError> {
        let channel = ChannelId::new(channel_id);
        let builder = CreateMessage::new()
            .content(text)
            .reference_message((channel, MessageId::new(message_id)));
        let posted = channel.send_message(&*self.http, builder).await?;
        Ok(PostedMessage {
            channel_id: posted.channel_id.get(),
            message_id: posted.id.get(),
        })
    }

    async fn remove_reaction(
        &self,
        path: RemovalPath,
        channel_id: u64,
        message_id: u64,
        user_id: u64,
        emoji: &str,
    ) -> Result<(), PlatformError> {
        debug!(?path, message_id, user_id, "Removing reaction {}", emoji);
        // Both paths hit the same endpoint; without Manage Messages Discord
        // rejects it unless the reaction is the bot's own.
        self.http
            .delete_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                UserId::new(user_id),
                &parse_reaction_type(emoji),
            )
            .await?;
        Ok(())
    }

    async fn delete_message(&self, message: PostedMessage) -> Result<(), PlatformError> {
        self.http
            .delete_message(
                ChannelId::new(message.channel_id),
                MessageId::new(message.message_id),
                None,
            )
            .await?;
        Ok(())
    }
}

/// Parse the display form of an emoji back into a [`ReactionType`].
///
/// Accepts `<:name:id>`, `<a:name:id>`, bare `name:id`, or a unicode glyph.
pub fn parse_reaction_type(emoji: &str) -> ReactionType {
    let inner = emoji
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(emoji);
    let (animated, inner) = match inner.strip_prefix("a:") {
        Some(rest) if emoji.starts_with('<') => (true, rest),
        _ => (false, inner.strip_prefix(':').unwrap_or(inner)),
    };

    if let Some((name, id_str)) = inner.rsplit_once(':') {
        if let Ok(id) = id_str.parse::<u64>() {
            return ReactionType::Custom {
                animated,
                id: EmojiId::new(id),
                name: Some(name.to_string()),
            };
        }
    }
    ReactionType::Unicode(emoji.to_string())
}
