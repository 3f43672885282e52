// File: src/core/dictionary.rs
use crate::overlay::CustomOverlay;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Characters stripped from a token before it is looked up.
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Shortest needle accepted by the containment fallback.
const MIN_CONTAINMENT_LEN: usize = 3;

/// The compiled-in table, in declaration order. Candidate order is preference order.
static BASE_TABLE: &[(&str, &[&str])] = &[
    // Emotions
    ("happy", &["😊", "😄", "🙂", "😁"]),
    ("sad", &["😢", "😭", "😔", "☹️"]),
    ("angry", &["😠", "😡", "🤬", "👿"]),
    ("love", &["❤️", "💕", "😍", "🥰"]),
    ("laugh", &["😂", "🤣", "😆", "😹"]),
    ("surprise", &["😮", "😲", "😯", "🙀"]),
    ("confused", &["😕", "🤔", "❓", "😵‍💫"]),
    // Nature
    ("sun", &["☀️", "🌞", "🌅", "🌄"]),
    ("moon", &["🌙", "🌛", "🌜", "🌝"]),
    ("star", &["⭐", "✨", "💫", "🌟"]),
    ("flower", &["🌸", "🌹", "🌻", "🌺"]),
    ("tree", &["🌲", "🌳", "🌴", "🎄"]),
    ("water", &["💧", "🌊", "🚿", "🌧️"]),
    ("fire", &["🔥", "🧨", "💥", "🎇"]),
    // Animals
    ("dog", &["🐶", "🐕", "🦮", "🐩"]),
    ("cat", &["🐱", "🐈", "😸", "😻"]),
    ("bird", &["🐦", "🦜", "🦢", "🦉"]),
    ("fish", &["🐠", "🐟", "🐡", "🦈"]),
    // Food
    ("pizza", &["🍕", "🧀", "🍅", "🍽️"]),
    ("burger", &["🍔", "🥪", "🥓", "🥩"]),
    ("fruit", &["🍎", "🍌", "🍓", "🍊"]),
    ("vegetable", &["🥦", "🥕", "🍆", "🌽"]),
    // Activities
    ("sleep", &["😴", "💤", "🛌", "🌙"]),
    ("work", &["💼", "👩‍💻", "👨‍💼", "📊"]),
    ("study", &["📚", "🧠", "✏️", "🎓"]),
    ("travel", &["✈️", "🧳", "🗺️", "🏝️"]),
    ("music", &["🎵", "🎶", "🎸", "🎤"]),
    ("sport", &["⚽", "🏀", "🎾", "🏆"]),
    // Common words
    ("yes", &["👍", "✅", "✔️", "🙌"]),
    ("no", &["👎", "❌", "🚫", "🙅"]),
    ("hello", &["👋", "🤗", "🙋", "💁"]),
    ("goodbye", &["👋", "✌️", "🚶", "💨"]),
    ("thanks", &["🙏", "💯", "🤝", "💐"]),
    ("please", &["🙏", "🥺", "🤲", "✨"]),
    ("sorry", &["😔", "🙇", "💔", "🤦"]),
    ("good", &["👍", "🌟", "💯", "🏆"]),
    ("bad", &["👎", "💩", "🚫", "⛔"]),
    ("cool", &["😎", "🆒", "👌", "🤙"]),
    ("hot", &["🔥", "🥵", "♨️", "🌡️"]),
    ("cold", &["❄️", "🥶", "⛄", "🧊"]),
    ("time", &["⏰", "⌚", "⏳", "📆"]),
    ("money", &["💰", "💵", "💸", "🤑"]),
    ("home", &["🏠", "🏡", "🛋️", "🛌"]),
    ("phone", &["📱", "☎️", "📞", "📲"]),
    ("heart", &["❤️", "💙", "💚", "💜"]),
    ("idea", &["💡", "🧠", "✨", "🤔"]),
    ("gift", &["🎁", "🎀", "🎊", "🎉"]),
    ("party", &["🎉", "🎊", "🥳", "🎈"]),
];

static BASE_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    BASE_TABLE
        .iter()
        .enumerate()
        .map(|(idx, (word, _))| (*word, idx))
        .collect()
});

/// Canonical key form: lowercase with the fixed punctuation set removed.
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Looks a normalized word up in the built-in table.
pub fn lookup(word: &str) -> Option<&'static [&'static str]> {
    BASE_INDEX.get(word).map(|&idx| BASE_TABLE[idx].1)
}

/// Built-in entries in declaration order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
    BASE_TABLE.iter().copied()
}

/// The built-in table seen through a caller's overlay.
///
/// Overlay entries shadow base entries with the same key. Iteration order is
/// base declaration order (with shadowed values swapped in), followed by
/// overlay-only keys in insertion order.
#[derive(Clone, Copy)]
pub struct Lexicon<'a> {
    overlay: &'a CustomOverlay,
}

impl<'a> Lexicon<'a> {
    pub fn new(overlay: &'a CustomOverlay) -> Self {
        Self { overlay }
    }

    /// Exact lookup of an already-normalized word.
    pub fn get(&self, word: &str) -> Option<Vec<&'a str>> {
        if word.is_empty() {
            return None;
        }
        if let Some(custom) = self.overlay.lookup(word) {
            return Some(custom.iter().map(String::as_str).collect());
        }
        lookup(word).map(|base| base.to_vec())
    }

    /// First candidate of the first entry whose key contains `word` or is
    /// contained by it. The contained side must be at least three characters.
    pub fn first_containing(&self, word: &str) -> Option<&'a str> {
        let word_len = word.chars().count();
        self.walk().find_map(|(key, candidates)| {
            let key_len = key.chars().count();
            let key_inside = key_len >= MIN_CONTAINMENT_LEN && word.contains(key);
            let word_inside = word_len >= MIN_CONTAINMENT_LEN && key.contains(word);
            if key_inside || word_inside {
                candidates.first().copied()
            } else {
                None
            }
        })
    }

    fn walk(&self) -> impl Iterator<Item = (&'a str, Vec<&'a str>)> + '_ {
        let overlay = self.overlay;
        let base = entries().map(move |(key, base)| -> (&'a str, Vec<&'a str>) {
            match overlay.lookup(key) {
                Some(custom) => (key, custom.iter().map(String::as_str).collect()),
                None => (key, base.to_vec()),
            }
        });
        let extra = overlay
            .iter()
            .filter(|(key, _)| lookup(key).is_none())
            .map(|(key, custom)| -> (&'a str, Vec<&'a str>) {
                (key, custom.iter().map(String::as_str).collect())
            });
        base.chain(extra)
    }
}
