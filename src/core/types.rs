// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered emoji glyphs for one dictionary word.
/// Index 0 is the primary choice; the list is never empty.
pub type EmojiCandidates = Vec<String>;

/// Candidate-selection policy applied wherever a dictionary hit occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Standard,
    Minimal,
    Expressive,
    Random,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Standard, Style::Minimal, Style::Expressive, Style::Random];

    /// Lenient parse: anything outside the known names is `Standard`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimal" => Style::Minimal,
            "expressive" => Style::Expressive,
            "random" => Style::Random,
            _ => Style::Standard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::Standard => "standard",
            Style::Minimal => "minimal",
            Style::Expressive => "expressive",
            Style::Random => "random",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which transformation runs over the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Pure emoji sequence, original words are dropped.
    #[serde(rename = "emoji-combo", alias = "combo")]
    Combo,
    /// Original text with matched words enriched.
    #[default]
    #[serde(rename = "emojify")]
    Emojify,
    /// One emoji in front of every non-blank line.
    #[serde(rename = "xiaohongshu", alias = "line-prefix")]
    LinePrefix,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Combo, Mode::Emojify, Mode::LinePrefix];

    /// Name used on the wire and in stored records.
    pub fn wire_name(self) -> &'static str {
        match self {
            Mode::Combo => "emoji-combo",
            Mode::Emojify => "emojify",
            Mode::LinePrefix => "xiaohongshu",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "emoji-combo" | "combo" => Some(Mode::Combo),
            "emojify" => Some(Mode::Emojify),
            "xiaohongshu" | "line-prefix" => Some(Mode::LinePrefix),
            _ => None,
        }
    }

    /// Sample input shown to users who want to try a mode.
    pub fn example_text(self) -> &'static str {
        match self {
            Mode::Combo => "I am happy to see you today. Let's celebrate with pizza and music!",
            Mode::Emojify => {
                "Good morning! I had coffee and breakfast. Now I'm ready to work on my project."
            }
            Mode::LinePrefix => {
                "Just got a new plant for my desk.\nMade delicious pasta for dinner.\nGoing hiking this weekend with friends."
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A saved conversion. Immutable once created; only deletion removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub id: String,
    pub original_text: String,
    pub emoji_text: String,
    /// Unix milliseconds.
    pub created_at: u64,
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

/// What the caller hands to the store; id and timestamp are assigned on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub original_text: String,
    pub emoji_text: String,
    pub style: Style,
    pub mode: Option<Mode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_falls_back_to_standard() {
        assert_eq!(Style::from_name("sparkly"), Style::Standard);
        assert_eq!(Style::from_name(" Expressive "), Style::Expressive);
    }

    #[test]
    fn mode_accepts_wire_and_short_names() {
        assert_eq!(Mode::from_name("xiaohongshu"), Some(Mode::LinePrefix));
        assert_eq!(Mode::from_name("line-prefix"), Some(Mode::LinePrefix));
        assert_eq!(Mode::from_name("combo"), Some(Mode::Combo));
        assert_eq!(Mode::from_name("haiku"), None);
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let record = TranslationRecord {
            id: "abc".into(),
            original_text: "hi".into(),
            emoji_text: "👋".into(),
            created_at: 7,
            style: Style::Minimal,
            mode: Some(Mode::Combo),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"originalText\":\"hi\""));
        assert!(json.contains("\"mode\":\"emoji-combo\""));
        assert!(json.contains("\"style\":\"minimal\""));
    }

    #[test]
    fn record_without_mode_still_loads() {
        let json = r#"{"id":"x","originalText":"a","emojiText":"b","createdAt":1,"style":"standard"}"#;
        let record: TranslationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.mode, None);
    }
}
