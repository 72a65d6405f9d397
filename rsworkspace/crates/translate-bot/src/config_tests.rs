#[cfg(test)]
mod tests {
    use crate::config::{Config, ReadEnv};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    struct InMemoryEnv(HashMap<&'static str, &'static str>);

    impl InMemoryEnv {
        fn new(pairs: &[(&'static str, &'static str)]) -> Self {
            Self(pairs.iter().cloned().collect())
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const REQUIRED: [(&str, &str); 2] = [("DISCORD_BOT_TOKEN", "tok"), ("DEEPL_API_KEY", "dk")];

    // ── from_file ─────────────────────────────────────────────────────────────

    #[test]
    fn test_from_file_minimal() {
        let toml = r#"
[discord]
bot_token = "BOT-TOKEN-123"

[translation.deepl]
api_key = "deepl-key"
"#;
        let f = write_toml(toml);
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.discord.bot_token, "BOT-TOKEN-123");
        assert_eq!(cfg.discord.command_prefix, "-");
        assert_eq!(cfg.translation.deepl.api_key, "deepl-key");
        assert_eq!(
            cfg.translation.deepl.base_url,
            "https://api-free.deepl.com/v2"
        );
        assert!(cfg.translation.openai.is_none());
        assert_eq!(cfg.translation.request_timeout_secs, 30);
        assert_eq!(
            cfg.storage.channel_config,
            PathBuf::from("channel_config.json")
        );
    }

    #[test]
    fn test_from_file_full() {
        let toml = r#"
[discord]
bot_token = "SECRET"
command_prefix = "!"
activity = "Translating"

[translation]
request_timeout_secs = 10

[translation.openai]
api_key = "sk-1"
model = "gpt-4o"
temperature = 0.2

[translation.deepl]
api_key = "dk"
base_url = "https://api.deepl.com/v2"

[storage]
channel_config = "/data/channels.json"
emoji_config = "/data/emoji.json"
whitelist = "/data/owners.json"
"#;
        let f = write_toml(toml);
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.discord.command_prefix, "!");
        assert_eq!(cfg.discord.activity, "Translating");
        let openai = cfg.translation.openai.unwrap();
        assert_eq!(openai.model, "gpt-4o");
        assert!((openai.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.translation.deepl.base_url, "https://api.deepl.com/v2");
        assert_eq!(cfg.translation.request_timeout_secs, 10);
        assert_eq!(cfg.storage.whitelist, PathBuf::from("/data/owners.json"));
    }

    #[test]
    fn test_from_file_missing_deepl_is_error() {
        let f = write_toml("[discord]\nbot_token = \"x\"\n[translation]\n");
        let err = Config::from_file(f.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_from_file_missing_file_is_error() {
        let err = Config::from_file("/nonexistent/translate-bot.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_example_config_parses() {
        let f = write_toml(include_str!("../../../../config/translate-bot.toml.example"));
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert!(cfg.translation.openai.is_some());
        assert!(cfg.validate().is_ok());
    }

    // ── from_env ──────────────────────────────────────────────────────────────

    #[test]
    fn test_from_env_missing_token_returns_error() {
        let env = InMemoryEnv::new(&[("DEEPL_API_KEY", "dk")]);
        let err = Config::from_env_impl(&env).unwrap_err();
        assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));
    }

    #[test]
    fn test_from_env_missing_deepl_returns_error() {
        let env = InMemoryEnv::new(&[("DISCORD_BOT_TOKEN", "tok")]);
        let err = Config::from_env_impl(&env).unwrap_err();
        assert!(err.to_string().contains("DEEPL_API_KEY"));
    }

    #[test]
    fn test_from_env_defaults() {
        let env = InMemoryEnv::new(&REQUIRED);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.bot_token, "tok");
        assert_eq!(cfg.discord.command_prefix, "-");
        assert_eq!(cfg.discord.activity, "Preparing for Translate...");
        assert!(cfg.translation.openai.is_none());
        assert_eq!(cfg.translation.request_timeout_secs, 30);
        assert_eq!(cfg.storage.emoji_config, PathBuf::from("emoji_config.json"));
        assert_eq!(cfg.storage.whitelist, PathBuf::from("whitelist.json"));
    }

    #[test]
    fn test_from_env_openai_enabled_by_key() {
        let env = InMemoryEnv::new(&[
            REQUIRED[0],
            REQUIRED[1],
            ("OPENAI_API_KEY", "sk"),
            ("OPENAI_MODEL", "gpt-4.1-mini"),
            ("OPENAI_TEMPERATURE", "0.3"),
        ]);
        let cfg = Config::from_env_impl(&env).unwrap();
        let openai = cfg.translation.openai.unwrap();
        assert_eq!(openai.api_key, "sk");
        assert_eq!(openai.model, "gpt-4.1-mini");
        assert!((openai.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_env_blank_openai_key_disables_primary() {
        let env = InMemoryEnv::new(&[REQUIRED[0], REQUIRED[1], ("OPENAI_API_KEY", "  ")]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert!(cfg.translation.openai.is_none());
    }

    #[test]
    fn test_from_env_invalid_temperature() {
        let env = InMemoryEnv::new(&[
            REQUIRED[0],
            REQUIRED[1],
            ("OPENAI_API_KEY", "sk"),
            ("OPENAI_TEMPERATURE", "warm"),
        ]);
        let err = Config::from_env_impl(&env).unwrap_err();
        assert!(err.to_string().contains("OPENAI_TEMPERATURE"));
    }

    #[test]
    fn test_from_env_overrides() {
        let env = InMemoryEnv::new(&[
            REQUIRED[0],
            REQUIRED[1],
            ("COMMAND_PREFIX", "?"),
            ("DEEPL_BASE_URL", "https://api.deepl.com/v2"),
            ("TRANSLATE_REQUEST_TIMEOUT_SECS", "5"),
            ("CHANNEL_CONFIG_PATH", "/srv/channels.json"),
        ]);
        let cfg = Config::from_env_impl(&env).unwrap();
        assert_eq!(cfg.discord.command_prefix, "?");
        assert_eq!(cfg.translation.deepl.base_url, "https://api.deepl.com/v2");
        assert_eq!(cfg.translation.request_timeout_secs, 5);
        assert_eq!(
            cfg.storage.channel_config,
            PathBuf::from("/srv/channels.json")
        );
    }

    // ── validate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_validate_accepts_env_config() {
        let cfg = Config::from_env_impl(&InMemoryEnv::new(&REQUIRED)).unwrap();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let mut cfg = Config::from_env_impl(&InMemoryEnv::new(&REQUIRED)).unwrap();
        cfg.discord.bot_token = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut cfg = Config::from_env_impl(&InMemoryEnv::new(&REQUIRED)).unwrap();
        cfg.translation.request_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
