//! Error types for llm-translate

use thiserror::Error;

/// Why a provider could not produce a translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The request never got a response (DNS, TLS, timeout, connection reset).
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("translation provider returned HTTP {status}")]
    Status { status: u16 },

    /// The provider answered 2xx but the body was not what we expected.
    #[error("malformed translation response: {0}")]
    Malformed(String),
}

impl TranslateError {
    /// HTTP status for [`TranslateError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}
