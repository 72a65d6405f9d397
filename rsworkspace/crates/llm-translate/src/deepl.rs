//! Secondary translator: DeepL REST API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::DeepLConfig;
use crate::error::TranslateError;
use crate::TranslationProvider;

/// Form POST to `{base_url}/translate` with `auth_key`, `text`, `target_lang`.
#[derive(Clone)]
pub struct DeepLTranslator {
    client: Client,
    config: DeepLConfig,
}

impl DeepLTranslator {
    pub fn new(client: Client, config: DeepLConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/translate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslationProvider for DeepLTranslator {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let target_lang = target_language.trim().to_ascii_uppercase();
        let form = [
            ("auth_key", self.config.api_key.as_str()),
            ("text", text),
            ("target_lang", target_lang.as_str()),
        ];

        debug!(target = %target_lang, "Sending DeepL translation request");

        let response = self.client.post(self.endpoint()).form(&form).send().await?;

        // DeepL only ever answers 200 on success.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(TranslateError::Status {
                status: status.as_u16(),
            });
        }

        let body: DeepLResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;

        body.translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| TranslateError::Malformed("empty translations array".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}
