// File: src/core/converter.rs
use crate::core::dictionary::{normalize, Lexicon};
use crate::core::style::{select, RandomSource};
use crate::core::types::{Mode, Style};
use crate::overlay::CustomOverlay;

/// Emitted when nothing in the dictionary matches.
pub const PLACEHOLDER_GLYPH: &str = "📝";

/// How many leading words of a line are inspected for its prefix emoji.
const PREFIX_LOOKAHEAD: usize = 3;

/// Dictionary-driven text → emoji conversion. Runs entirely offline.
pub struct LocalEngine<'a> {
    lexicon: Lexicon<'a>,
}

impl<'a> LocalEngine<'a> {
    pub fn new(overlay: &'a CustomOverlay) -> Self {
        Self {
            lexicon: Lexicon::new(overlay),
        }
    }

    /// Dispatches to the transformation for `mode`.
    pub fn render(&self, mode: Mode, text: &str, style: Style, rng: &mut dyn RandomSource) -> String {
        match mode {
            Mode::Combo => self.combo(text),
            Mode::Emojify => self.emojify(text, style, rng),
            Mode::LinePrefix => self.line_prefix(text),
        }
    }

    /// Replaces every word with a single emoji. Original words never survive.
    ///
    /// Exact hits use the primary candidate; misses fall back to the first
    /// dictionary key related by containment, then to [`PLACEHOLDER_GLYPH`].
    pub fn combo(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| {
                let word = normalize(token);
                self.lexicon
                    .get(&word)
                    .and_then(|candidates| candidates.first().copied())
                    .or_else(|| self.lexicon.first_containing(&word))
                    .unwrap_or(PLACEHOLDER_GLYPH)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Swaps matched words for emoji rendered in `style`; everything else is
    /// kept exactly as typed. Whitespace runs collapse to single spaces.
    pub fn emojify(&self, text: &str, style: Style, rng: &mut dyn RandomSource) -> String {
        text.split_whitespace()
            .map(|token| match self.lexicon.get(&normalize(token)) {
                Some(candidates) => select(&candidates, style, rng),
                None => token.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Puts one emoji and a space in front of every non-blank line.
    ///
    /// The emoji comes from the first of the line's first three words that
    /// hits the dictionary. Blank lines are passed through untouched.
    pub fn line_prefix(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    return line.to_string();
                }
                let glyph = line
                    .split_whitespace()
                    .take(PREFIX_LOOKAHEAD)
                    .find_map(|token| {
                        self.lexicon
                            .get(&normalize(token))
                            .and_then(|candidates| candidates.first().copied())
                    })
                    .unwrap_or(PLACEHOLDER_GLYPH);
                format!("{glyph} {line}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
