//! Per-scope translation policies
//!
//! A scope is either a channel or a channel category. The persisted layout is
//! `{ "channels": { "<id>": {..} }, "categories": { "<id>": {..} } }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Activation and delivery mode for one scope.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScopeConfig {
    /// Whether reactions in this scope trigger translations
    #[serde(default)]
    pub active: bool,
    /// Deliver by direct message instead of a public reply
    #[serde(default, rename = "send_dm")]
    pub deliver_via_dm: bool,
}

impl ScopeConfig {
    pub fn new(active: bool, deliver_via_dm: bool) -> Self {
        Self {
            active,
            deliver_via_dm,
        }
    }
}

/// The whole policy file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfigFile {
    #[serde(default)]
    pub channels: BTreeMap<u64, ScopeConfig>,
    #[serde(default)]
    pub categories: BTreeMap<u64, ScopeConfig>,
}

impl ChannelConfigFile {
    pub fn channel(&self, channel_id: u64) -> Option<ScopeConfig> {
        self.channels.get(&channel_id).copied()
    }

    pub fn category(&self, category_id: u64) -> Option<ScopeConfig> {
        self.categories.get(&category_id).copied()
    }

    /// Effective policy for a channel.
    ///
    /// A channel entry replaces the category entry as a whole; the two are
    /// never merged. With neither present the scope is inactive.
    pub fn resolve(&self, channel_id: u64, category_id: Option<u64>) -> ScopeConfig {
        self.channel(channel_id)
            .or_else(|| category_id.and_then(|id| self.category(id)))
            .unwrap_or_default()
    }

    pub fn set_channel(&mut self, channel_id: u64, config: ScopeConfig) {
        self.channels.insert(channel_id, config);
    }

    pub fn set_category(&mut self, category_id: u64, config: ScopeConfig) {
        self.categories.insert(category_id, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_inactive() {
        let file = ChannelConfigFile::default();
        let cfg = file.resolve(1, Some(2));
        assert!(!cfg.active);
        assert!(!cfg.deliver_via_dm);
    }

    #[test]
    fn test_resolve_uses_category_when_channel_missing() {
        let mut file = ChannelConfigFile::default();
        file.set_category(2, ScopeConfig::new(true, true));
        assert_eq!(file.resolve(1, Some(2)), ScopeConfig::new(true, true));
    }

    #[test]
    fn test_resolve_channel_overrides_category_without_merge() {
        let mut file = ChannelConfigFile::default();
        file.set_category(2, ScopeConfig::new(true, true));
        file.set_channel(1, ScopeConfig::new(false, false));
        assert_eq!(file.resolve(1, Some(2)), ScopeConfig::new(false, false));

        file.set_channel(1, ScopeConfig::new(true, false));
        assert_eq!(file.resolve(1, Some(2)), ScopeConfig::new(true, false));
    }

    #[test]
    fn test_resolve_ignores_category_of_other_channel() {
        let mut file = ChannelConfigFile::default();
        file.set_category(2, ScopeConfig::new(true, false));
        assert!(!file.resolve(1, None).active);
        assert!(!file.resolve(1, Some(3)).active);
    }

    #[test]
    fn test_parse_persisted_layout() {
        let json = r#"{
            "channels": { "111": { "active": true, "send_dm": false } },
            "categories": { "222": { "active": false, "send_dm": true } }
        }"#;
        let file: ChannelConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.channel(111), Some(ScopeConfig::new(true, false)));
        assert_eq!(file.category(222), Some(ScopeConfig::new(false, true)));
    }

    #[test]
    fn test_parse_missing_sections() {
        let file: ChannelConfigFile = serde_json::from_str("{}").unwrap();
        assert!(file.channels.is_empty());
        assert!(file.categories.is_empty());
    }

    #[test]
    fn test_serialize_uses_send_dm_key() {
        let mut file = ChannelConfigFile::default();
        file.set_channel(5, ScopeConfig::new(true, true));
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"5\""));
        assert!(json.contains("\"send_dm\":true"));
    }
}
