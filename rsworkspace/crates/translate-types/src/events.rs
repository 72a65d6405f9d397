//! Reaction events consumed by the relay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reaction was added to a message.
///
/// Built by the gateway handler from serenity's `Reaction`; the emoji is kept
/// in its display form (`👍`, `<:name:id>` or `<a:name:id>`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionEvent {
    pub message_id: u64,
    pub channel_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<u64>,
    pub reactor_id: u64,
    /// Bot reactions never trigger a relay.
    #[serde(default)]
    pub reactor_is_bot: bool,
    pub emoji: String,
    pub received_at: DateTime<Utc>,
}

impl ReactionEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        message_id: u64,
        channel_id: u64,
        guild_id: Option<u64>,
        reactor_id: u64,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            message_id,
            channel_id,
            guild_id,
            reactor_id,
            reactor_is_bot: false,
            emoji: emoji.into(),
            received_at: Utc::now(),
        }
    }

    /// Mark the reactor as a bot account.
    pub fn from_bot(mut self, is_bot: bool) -> Self {
        self.reactor_is_bot = is_bot;
        self
    }

    /// The (message, emoji, reactor) triple identifying one unit of relay work.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            message_id: self.message_id,
            emoji: self.emoji.clone(),
            reactor_id: self.reactor_id,
        }
    }
}

/// Identifies one admissible unit of relay work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub message_id: u64,
    pub emoji: String,
    pub reactor_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_fields() {
        let event = ReactionEvent::new(10, 20, Some(30), 40, "🇬🇧");
        let key = event.dedup_key();
        assert_eq!(key.message_id, 10);
        assert_eq!(key.emoji, "🇬🇧");
        assert_eq!(key.reactor_id, 40);
    }

    #[test]
    fn test_dedup_key_ignores_channel_and_time() {
        let a = ReactionEvent::new(10, 20, None, 40, "🇫🇷");
        let b = ReactionEvent::new(10, 99, Some(1), 40, "🇫🇷");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_distinct_per_emoji() {
        let a = ReactionEvent::new(10, 20, None, 40, "🇫🇷");
        let b = ReactionEvent::new(10, 20, None, 40, "🇩🇪");
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_from_bot_flag() {
        let event = ReactionEvent::new(1, 2, None, 3, "👍");
        assert!(!event.reactor_is_bot);
        assert!(event.from_bot(true).reactor_is_bot);
    }

    #[test]
    fn test_event_omits_missing_guild() {
        let event = ReactionEvent::new(1, 2, None, 3, "👍");
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("guild_id"));
    }
}
