//! Primary translator: OpenAI-compatible chat completions.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::error::TranslateError;
use crate::language::language_name;
use crate::TranslationProvider;

/// Single-turn chat completion instructed to return only the translation.
#[derive(Clone)]
pub struct OpenAiTranslator {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiTranslator {
    pub fn new(client: Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// Prompt sent as the single user turn.
pub fn build_prompt(text: &str, target_language: &str) -> String {
    let name = language_name(target_language);
    format!(
        "Translate the following text into {name} only. \
         Do not add any commentary, reply with the translation alone.\n\n{text}"
    )
}

#[async_trait]
impl TranslationProvider for OpenAiTranslator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(text, target_language),
            }],
        };

        debug!(
            model = %self.config.model,
            target = target_language,
            "Sending chat completion translation request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body = %body, "Chat completion returned an error status");
            return Err(TranslateError::Status {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TranslateError::Malformed("no completion content".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
