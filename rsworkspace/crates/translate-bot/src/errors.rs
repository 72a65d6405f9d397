//! Discord-specific error handling for the relay.
//!
//! Converts serenity errors into a [`PlatformError`] carrying the classified
//! Discord code, and logs swallowed failures at a level that matches their
//! category: a reply that was already deleted is noise, a missing permission
//! is worth a warning.

use serenity::http::HttpError;
use thiserror::Error;
use tracing::{debug, error, warn};
use translate_types::{DiscordErrorCode, ErrorCategory};

/// A failed Discord operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} ({code:?}, HTTP {http_status})")]
pub struct PlatformError {
    pub code: DiscordErrorCode,
    pub http_status: u16,
    pub message: String,
}

impl PlatformError {
    pub fn new(code: DiscordErrorCode, http_status: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            http_status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    pub fn is_permanent(&self) -> bool {
        self.code.is_permanent()
    }
}

impl From<serenity::Error> for PlatformError {
    fn from(err: serenity::Error) -> Self {
        classify(&err)
    }
}

/// Classify a serenity `Error`.
pub fn classify(err: &serenity::Error) -> PlatformError {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => from_response(
            resp.status_code.as_u16(),
            resp.error.code as u32,
            &resp.error.message,
        ),
        _ => PlatformError::new(DiscordErrorCode::NetworkError, 0, err.to_string()),
    }
}

/// Build a [`PlatformError`] from an HTTP status and Discord JSON error code.
pub fn from_response(http_status: u16, raw_code: u32, message: &str) -> PlatformError {
    let code = if http_status == 429 {
        DiscordErrorCode::RateLimited
    } else {
        DiscordErrorCode::from_raw(raw_code)
    };
    PlatformError::new(code, http_status, message)
}

/// Log a failure that the relay deliberately swallows.
pub fn log_swallowed(context: &str, err: &PlatformError) {
    match err.category() {
        ErrorCategory::NotFound => debug!("{} [{:?}]: {}", context, err.code, err.message),
        _ => warn!(
            permanent = err.is_permanent(),
            "{} [{:?}]: {}",
            context,
            err.code,
            err.message
        ),
    }
}

/// Log a failure that ends processing of the current event.
pub fn log_fatal(context: &str, err: &PlatformError) {
    error!(
        "{} [{:?}, HTTP {}]: {}",
        context, err.code, err.http_status, err.message
    );
}
