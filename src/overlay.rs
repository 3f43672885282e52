// File: src/overlay.rs
use crate::core::dictionary::normalize;
use crate::error::{OverlayError, StoreError};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// User-supplied word → emoji mappings merged over the built-in dictionary.
///
/// Keys are normalized on the way in, so a lookup with a normalized token
/// always finds them. Insertion order is kept; it decides containment order
/// for words the built-in table does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomOverlay {
    entries: Vec<(String, Vec<String>)>,
}

impl CustomOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a mapping. Returns `false` (and changes nothing) when
    /// the word normalizes to nothing or no emoji is given.
    pub fn insert(&mut self, word: &str, emojis: Vec<String>) -> bool {
        let key = normalize(word.trim());
        let emojis: Vec<String> = emojis.into_iter().filter(|e| !e.trim().is_empty()).collect();
        if key.is_empty() || emojis.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = emojis,
            None => self.entries.push((key, emojis)),
        }
        true
    }

    /// Validates raw form input: a word plus emojis separated by spaces or commas.
    pub fn add_from_input(&mut self, word: &str, emojis: &str) -> Result<(), OverlayError> {
        if word.trim().is_empty() {
            return Err(OverlayError::MissingWord);
        }
        let list = parse_emoji_list(emojis);
        if list.is_empty() {
            return Err(OverlayError::NoEmojis);
        }
        if !self.insert(word, list) {
            return Err(OverlayError::MissingWord);
        }
        tracing::debug!(word = %word.trim(), "custom mapping added");
        Ok(())
    }

    pub fn remove(&mut self, word: &str) -> bool {
        let key = normalize(word.trim());
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != key);
        self.entries.len() != before
    }

    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == word)
            .map(|(_, emojis)| emojis.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(key, emojis)| (key.as_str(), emojis.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a JSON object of `word: [emoji, ...]`. A missing file is an empty overlay.
    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<(), StoreError> {
        let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        drop(writer);

        temp_file.persist(path)?;
        Ok(())
    }
}

/// Splits dialog input on runs of whitespace and commas.
pub fn parse_emoji_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

impl Serialize for CustomOverlay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for CustomOverlay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OverlayVisitor;

        impl<'de> Visitor<'de> for OverlayVisitor {
            type Value = CustomOverlay;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of word to emoji list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut overlay = CustomOverlay::default();
                while let Some((word, emojis)) = map.next_entry::<String, Vec<String>>()? {
                    if !overlay.insert(&word, emojis) {
                        tracing::warn!(%word, "skipping empty custom mapping");
                    }
                }
                Ok(overlay)
            }
        }

        deserializer.deserialize_map(OverlayVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_split_on_spaces_and_commas() {
        assert_eq!(parse_emoji_list("🤩, 🥳 ,,🎉"), vec!["🤩", "🥳", "🎉"]);
        assert!(parse_emoji_list(" , ").is_empty());
    }

    #[test]
    fn add_from_input_validates() {
        let mut overlay = CustomOverlay::new();
        assert_eq!(overlay.add_from_input("  ", "🤩"), Err(OverlayError::MissingWord));
        assert_eq!(overlay.add_from_input("yay", " ,"), Err(OverlayError::NoEmojis));
        assert_eq!(overlay.add_from_input("...", "🤩"), Err(OverlayError::MissingWord));
        assert!(overlay.is_empty());

        overlay.add_from_input(" Yay! ", "🤩 🥳").unwrap();
        assert_eq!(overlay.lookup("yay"), Some(&["🤩".to_string(), "🥳".to_string()][..]));
    }

    #[test]
    fn reinserting_replaces_in_place() {
        let mut overlay = CustomOverlay::new();
        overlay.insert("a-b", vec!["1".into()]);
        overlay.insert("zed", vec!["2".into()]);
        overlay.insert("AB", vec!["3".into()]);
        let keys: Vec<&str> = overlay.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["ab", "zed"]);
        assert_eq!(overlay.lookup("ab"), Some(&["3".to_string()][..]));
    }

    #[test]
    fn json_keeps_insertion_order() {
        let json = r#"{"zebra": ["🦓"], "apple": ["🍏", "🍎"]}"#;
        let overlay: CustomOverlay = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = overlay.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
        let back = serde_json::to_string(&overlay).unwrap();
        assert_eq!(back, r#"{"zebra":["🦓"],"apple":["🍏","🍎"]}"#);
    }

    #[test]
    fn remove_drops_mapping() {
        let mut overlay = CustomOverlay::new();
        overlay.insert("yay", vec!["🥳".into()]);
        assert!(overlay.remove("YAY"));
        assert!(!overlay.remove("yay"));
        assert!(overlay.lookup("yay").is_none());
    }
}
