//! Emoji → language bindings

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Glyph → target language code table, loaded once at startup.
///
/// Persisted as a flat JSON object, e.g. `{ "🇬🇧": "EN", "🇹🇷": "TR" }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EmojiLanguageMap {
    bindings: HashMap<String, String>,
}

impl EmojiLanguageMap {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }

    /// Language bound to `glyph`, if any.
    pub fn language_for(&self, glyph: &str) -> Option<&str> {
        self.bindings.get(glyph).map(String::as_str)
    }

    /// All glyphs bound to `language` (case-insensitive), sorted.
    pub fn glyphs_for(&self, language: &str) -> Vec<&str> {
        let mut glyphs: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, lang)| lang.eq_ignore_ascii_case(language))
            .map(|(glyph, _)| glyph.as_str())
            .collect();
        glyphs.sort_unstable();
        glyphs
    }

    /// Distinct languages, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.bindings.values().map(String::as_str).collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Language → glyphs view, used for listings.
    pub fn by_language(&self) -> BTreeMap<&str, Vec<&str>> {
        self.languages()
            .into_iter()
            .map(|lang| (lang, self.glyphs_for(lang)))
            .collect()
    }
}

impl FromIterator<(String, String)> for EmojiLanguageMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(glyph, lang)| (glyph.trim().to_string(), lang.trim().to_string()))
                .filter(|(glyph, lang)| !glyph.is_empty() && !lang.is_empty())
                .collect(),
        }
    }
}
