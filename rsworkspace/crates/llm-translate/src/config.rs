use serde::{Deserialize, Serialize};

/// Primary translator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (`OPENAI_API_KEY`).
    pub api_key: String,
    /// Chat model. Default: `"gpt-4o-mini"`.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature. Default: `0.7`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Base URL of an OpenAI-compatible API. Default: `https://api.openai.com/v1`.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_openai_base_url(),
        }
    }
}

/// Secondary translator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    /// DeepL authentication key (`DEEPL_API_KEY`).
    pub api_key: String,
    /// Default: the free-tier endpoint `https://api-free.deepl.com/v2`.
    #[serde(default = "default_deepl_base_url")]
    pub base_url: String,
}

impl DeepLConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_deepl_base_url(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_deepl_base_url() -> String {
    "https://api-free.deepl.com/v2".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults() {
        let cfg = OpenAiConfig::new("sk-test");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert!((cfg.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(cfg.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_openai_serde_defaults() {
        let cfg: OpenAiConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.model, "gpt-4o-mini");
    }

    #[test]
    fn test_deepl_defaults() {
        let cfg: DeepLConfig = serde_json::from_str(r#"{"api_key": "d"}"#).unwrap();
        assert_eq!(cfg.base_url, "https://api-free.deepl.com/v2");
    }
}
