//! Ordered primary → secondary translation with a visible degraded result.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::TranslateError;
use crate::TranslationProvider;

/// Outcome of a chain run. Both variants carry text that can be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated {
        text: String,
        provider: &'static str,
    },
    /// Every provider failed; `text` describes the failure for the reactor.
    Degraded { text: String, reason: String },
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Self::Translated { text, .. } | Self::Degraded { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Translated { text, .. } | Self::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    fn degraded(err: &TranslateError) -> Self {
        let text = match err {
            TranslateError::Status { status } => {
                format!("Translation failed. Error code: {status}")
            }
            TranslateError::Transport(_) => {
                "Translation failed. The translation service is unreachable.".to_string()
            }
            TranslateError::Malformed(_) => {
                "Translation failed. The translation service returned an unexpected response."
                    .to_string()
            }
        };
        Self::Degraded {
            text,
            reason: err.to_string(),
        }
    }
}

/// Primary provider (optional) with a mandatory secondary fallback.
#[derive(Clone)]
pub struct TranslationChain {
    primary: Option<Arc<dyn TranslationProvider>>,
    secondary: Arc<dyn TranslationProvider>,
}

impl TranslationChain {
    pub fn new(
        primary: Option<Arc<dyn TranslationProvider>>,
        secondary: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Translate, falling back on any primary failure. Never fails.
    pub async fn translate(&self, text: &str, target_language: &str) -> Translation {
        if let Some(primary) = &self.primary {
            match primary.translate(text, target_language).await {
                Ok(text) => {
                    return Translation::Translated {
                        text,
                        provider: primary.name(),
                    }
                }
                Err(e) => {
                    warn!(
                        provider = primary.name(),
                        error = %e,
                        "Primary translator failed, falling back to {}",
                        self.secondary.name()
                    );
                }
            }
        }

        match self.secondary.translate(text, target_language).await {
            Ok(text) => Translation::Translated {
                text,
                provider: self.secondary.name(),
            },
            Err(e) => {
                warn!(provider = self.secondary.name(), error = %e, "Secondary translator failed");
                let degraded = Translation::degraded(&e);
                debug!("Delivering degraded translation: {}", degraded.text());
                degraded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider {
        name: &'static str,
        result: Result<&'static str, u16>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn ok(name: &'static str, text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                result: Ok(text),
                calls: AtomicUsize::new(0),
            })
        }

        fn status(name: &'static str, status: u16) -> Arc<Self> {
            Arc::new(Self {
                name,
                result: Err(status),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for FixedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn translate(&self, _text: &str, _lang: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.result {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(TranslateError::Status { status }),
            }
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = FixedProvider::ok("primary", "Hello");
        let secondary = FixedProvider::ok("secondary", "Hi");
        let chain = TranslationChain::new(Some(primary.clone()), secondary.clone());

        let out = chain.translate("Merhaba", "EN").await;
        assert_eq!(
            out,
            Translation::Translated {
                text: "Hello".to_string(),
                provider: "primary"
            }
        );
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let primary = FixedProvider::status("primary", 500);
        let secondary = FixedProvider::ok("secondary", "Hi");
        let chain = TranslationChain::new(Some(primary.clone()), secondary.clone());

        let out = chain.translate("Merhaba", "EN").await;
        assert_eq!(out.text(), "Hi");
        assert!(!out.is_degraded());
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_fail_yields_status_string() {
        let chain = TranslationChain::new(
            Some(FixedProvider::status("primary", 500)),
            FixedProvider::status("secondary", 456),
        );

        let out = chain.translate("Merhaba", "EN").await;
        assert!(out.is_degraded());
        assert_eq!(out.text(), "Translation failed. Error code: 456");
    }

    #[tokio::test]
    async fn test_without_primary_uses_secondary() {
        let secondary = FixedProvider::ok("secondary", "Hallo");
        let chain = TranslationChain::new(None, secondary.clone());

        let out = chain.translate("Merhaba", "DE").await;
        assert_eq!(out.into_text(), "Hallo");
        assert_eq!(secondary.calls(), 1);
    }

    #[test]
    fn test_degraded_malformed_text() {
        let out = Translation::degraded(&TranslateError::Malformed("x".to_string()));
        assert!(out.text().starts_with("Translation failed."));
        assert!(matches!(out, Translation::Degraded { ref reason, .. } if reason.contains("x")));
    }
}
