//! Translation providers for the emoji relay.
//!
//! Two providers sit behind [`TranslationProvider`]: an OpenAI-compatible chat
//! completion call ([`OpenAiTranslator`]) and the DeepL REST API
//! ([`DeepLTranslator`]). [`TranslationChain`] tries them in order and never
//! fails outward.

pub mod chain;
pub mod config;
pub mod deepl;
pub mod error;
pub mod language;
pub mod openai;

pub use chain::{Translation, TranslationChain};
pub use config::{DeepLConfig, OpenAiConfig};
pub use deepl::DeepLTranslator;
pub use error::TranslateError;
pub use openai::OpenAiTranslator;

use async_trait::async_trait;

/// One translation backend.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Translate `text` into `target_language` (a language code such as `EN`).
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}
