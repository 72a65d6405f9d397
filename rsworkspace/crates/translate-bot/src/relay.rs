//! Reaction → translation relay
//!
//! One call to [`Relay::handle`] processes one reaction event end to end:
//! admission, emoji lookup, policy check, translation, delivery, reaction
//! cleanup and (for public replies) scheduled deletion. Every failure past
//! admission is logged and converted into a [`RelayOutcome`]; nothing is
//! propagated back to the gateway handler.

#[path = "relay_tests.rs"]
mod relay_tests;

use std::sync::Arc;
use std::time::Duration;

use llm_translate::TranslationChain;
use tracing::{debug, error, info};
use translate_types::{EmojiLanguageMap, ReactionEvent};

use crate::dedup::ReactionDeduplicator;
use crate::errors::{log_fatal, log_swallowed};
use crate::platform::{MessageContext, PostedMessage, RelayPlatform, RemovalPath};
use crate::policy_store::PolicyStore;
use crate::stats::RelayStats;

/// Discord's per-message character limit.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// How long a public translation reply stays up.
pub const PUBLIC_REPLY_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    BotReactor,
    UnmappedEmoji,
    MessageUnavailable,
    PolicyUnreadable,
    Inactive,
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The same (message, emoji, reactor) was already in flight.
    Duplicate,
    Dropped(DropReason),
    DeliveredDm,
    /// Public reply posted and scheduled for deletion.
    Replied,
    /// Posting the public reply failed; no cleanup was attempted.
    ReplyFailed,
}

pub struct Relay<P: RelayPlatform> {
    platform: Arc<P>,
    chain: TranslationChain,
    emoji: Arc<EmojiLanguageMap>,
    policies: PolicyStore,
    dedup: ReactionDeduplicator,
    stats: RelayStats,
    reply_ttl: Duration,
}

impl<P: RelayPlatform> Relay<P> {
    pub fn new(
        platform: Arc<P>,
        chain: TranslationChain,
        emoji: Arc<EmojiLanguageMap>,
        policies: PolicyStore,
    ) -> Self {
        Self {
            platform,
            chain,
            emoji,
            policies,
            dedup: ReactionDeduplicator::new(),
            stats: RelayStats::new(),
            reply_ttl: PUBLIC_REPLY_TTL,
        }
    }

    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    pub async fn handle(&self, event: ReactionEvent) -> RelayOutcome {
        let outcome = self.process(&event).await;
        match outcome {
            RelayOutcome::Duplicate => self.stats.record_duplicate(),
            RelayOutcome::Dropped(reason) => {
                debug!(
                    message_id = event.message_id,
                    emoji = %event.emoji,
                    ?reason,
                    "Reaction dropped"
                );
                self.stats.record_dropped();
            }
            RelayOutcome::DeliveredDm => self.stats.record_delivered_dm(),
            RelayOutcome::Replied => self.stats.record_replied(),
            RelayOutcome::ReplyFailed => self.stats.record_reply_failed(),
        }
        outcome
    }

    async fn process(&self, event: &ReactionEvent) -> RelayOutcome {
        if event.reactor_is_bot {
            return RelayOutcome::Dropped(DropReason::BotReactor);
        }

        // Held until this function returns, on every path.
        let Some(_admission) = self.dedup.admit(event.dedup_key()) else {
            return RelayOutcome::Duplicate;
        };
        self.stats.record_admitted();

        let Some(language) = self.emoji.language_for(&event.emoji) else {
            return RelayOutcome::Dropped(DropReason::UnmappedEmoji);
        };

        let context = match self
            .platform
            .message_context(event.channel_id, event.message_id)
            .await
        {
            Ok(context) => context,
            Err(e) => {
                log_swallowed("Failed to fetch reacted message", &e);
                return RelayOutcome::Dropped(DropReason::MessageUnavailable);
            }
        };

        let policy = match self.policies.resolve(event.channel_id, context.category_id) {
            Ok(policy) => policy,
            Err(e) => {
                error!("Failed to read channel policy: {:#}", e);
                return RelayOutcome::Dropped(DropReason::PolicyUnreadable);
            }
        };
        if !policy.active {
            return RelayOutcome::Dropped(DropReason::Inactive);
        }
        if context.content.trim().is_empty() {
            return RelayOutcome::Dropped(DropReason::EmptyMessage);
        }

        let translation = self.chain.translate(&context.content, language).await;
        if translation.is_degraded() {
            self.stats.record_degraded();
        }
        let text = clamp_message(translation.text());

        info!(
            message_id = event.message_id,
            reactor_id = event.reactor_id,
            language,
            dm = policy.deliver_via_dm,
            "Delivering translation"
        );

        let removal = removal_path(&context);
        if policy.deliver_via_dm {
            if let Err(e) = self.platform.send_dm(event.reactor_id, &text).await {
                log_swallowed("Failed to send translation DM", &e);
            }
            self.remove_reaction(removal, event).await;
            RelayOutcome::DeliveredDm
        } else {
            let posted = match self
                .platform
                .send_reply(event.channel_id, event.message_id, &text)
                .await
            {
                Ok(posted) => posted,
                Err(e) => {
                    log_fatal("Failed to post translation reply", &e);
                    return RelayOutcome::ReplyFailed;
                }
            };
            self.remove_reaction(removal, event).await;
            self.schedule_delete(posted);
            RelayOutcome::Replied
        }
    }

    async fn remove_reaction(&self, path: RemovalPath, event: &ReactionEvent) {
        if let Err(e) = self
            .platform
            .remove_reaction(
                path,
                event.channel_id,
                event.message_id,
                event.reactor_id,
                &event.emoji,
            )
            .await
        {
            log_swallowed("Failed to remove reaction", &e);
        }
    }

    /// Delete `posted` after the reply TTL. Not cancellable.
    fn schedule_delete(&self, posted: PostedMessage) {
        let platform = Arc::clone(&self.platform);
        let ttl = self.reply_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            match platform.delete_message(posted).await {
                Ok(()) => debug!(message_id = posted.message_id, "Translation reply deleted"),
                Err(e) => log_swallowed("Failed to delete translation reply", &e),
            }
        });
    }
}

fn removal_path(context: &MessageContext) -> RemovalPath {
    if context.guild_id.is_some() && context.bot_can_manage_messages {
        RemovalPath::Moderator
    } else {
        RemovalPath::Reactor
    }
}

/// Truncate to [`DISCORD_MESSAGE_LIMIT`] characters.
pub fn clamp_message(text: &str) -> String {
    match text.char_indices().nth(DISCORD_MESSAGE_LIMIT) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
