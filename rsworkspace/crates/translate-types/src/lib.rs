//! Shared types for the emoji translation relay

pub mod emoji;
pub mod errors;
pub mod events;
pub mod policies;

pub use emoji::EmojiLanguageMap;
pub use errors::{DiscordErrorCode, ErrorCategory};
pub use events::{DedupKey, ReactionEvent};
pub use policies::{ChannelConfigFile, ScopeConfig};
