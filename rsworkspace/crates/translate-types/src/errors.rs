//! Discord error classification shared by the relay.
//!
//! Only the codes the relay can actually hit are named: fetching a message,
//! posting a reply or DM, removing a reaction and deleting a message.

use serde::{Deserialize, Serialize};

/// High-level category of a Discord API error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Rate limit hit.
    RateLimit,
    /// Channel, message, emoji or user no longer exists.
    NotFound,
    /// Bot lacks the permission, or the user refuses DMs.
    PermissionDenied,
    /// The request was rejected as invalid.
    InvalidInput,
    /// Network or I/O error.
    Network,
    /// Anything else.
    Unknown,
}

/// Discord JSON error codes relevant to relay operations.
///
/// See <https://discord.com/developers/docs/topics/opcodes-and-status-codes#json>.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscordErrorCode {
    /// 10003
    UnknownChannel,
    /// 10008: the message was deleted.
    UnknownMessage,
    /// 10013
    UnknownUser,
    /// 10014: the reaction emoji no longer exists.
    UnknownEmoji,
    /// 50001
    MissingAccess,
    /// 50013: e.g. removing someone else's reaction without Manage Messages.
    MissingPermissions,
    /// 50007: DMs closed or the bot is blocked.
    CannotSendToUser,
    /// 50006
    CannotSendEmptyMessage,
    /// 50035: e.g. content over 2000 characters.
    InvalidFormBody,
    /// 160002
    CannotReplyWithoutHistory,
    /// 50083 / 160005: archived or locked thread.
    ThreadLocked,
    /// HTTP 429
    RateLimited,
    /// Client-side network failure.
    NetworkError,
    Unknown,
}

impl DiscordErrorCode {
    /// Derive the code from a raw Discord JSON error code.
    pub fn from_raw(code: u32) -> Self {
        match code {
            10003 => Self::UnknownChannel,
            10008 => Self::UnknownMessage,
            10013 => Self::UnknownUser,
            10014 => Self::UnknownEmoji,
            50001 => Self::MissingAccess,
            50006 => Self::CannotSendEmptyMessage,
            50007 => Self::CannotSendToUser,
            50013 => Self::MissingPermissions,
            50035 => Self::InvalidFormBody,
            50083 | 160005 => Self::ThreadLocked,
            160002 => Self::CannotReplyWithoutHistory,
            _ => Self::Unknown,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownChannel | Self::UnknownMessage | Self::UnknownUser | Self::UnknownEmoji => {
                ErrorCategory::NotFound
            }
            Self::MissingAccess | Self::MissingPermissions | Self::CannotSendToUser => {
                ErrorCategory::PermissionDenied
            }
            Self::CannotSendEmptyMessage
            | Self::InvalidFormBody
            | Self::CannotReplyWithoutHistory
            | Self::ThreadLocked => ErrorCategory::InvalidInput,
            Self::RateLimited => ErrorCategory::RateLimit,
            Self::NetworkError => ErrorCategory::Network,
            Self::Unknown => ErrorCategory::Unknown,
        }
    }

    /// True if repeating the same call cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::NotFound | ErrorCategory::PermissionDenied | ErrorCategory::InvalidInput
        )
    }
}
