// File: src/core/style.rs
use crate::core::types::Style;
use rand::Rng;

/// Source of the index picked by [`Style::Random`].
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG; what production code uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices (wrapped into range), cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    picks: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        value % len
    }
}

/// Renders one dictionary hit according to `style`.
///
/// Empty candidate lists render as an empty string.
pub fn select<S: AsRef<str>>(candidates: &[S], style: Style, rng: &mut dyn RandomSource) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    match style {
        Style::Minimal => concat(&candidates[..1]),
        Style::Expressive => concat(candidates),
        Style::Random => {
            let idx = rng.pick(candidates.len()).min(candidates.len() - 1);
            concat(&candidates[idx..=idx])
        }
        Style::Standard => concat(&candidates[..candidates.len().min(2)]),
    }
}

fn concat<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = String::new();
    for part in parts {
        out.push_str(part.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HAPPY: [&str; 4] = ["😊", "😄", "🙂", "😁"];

    #[test]
    fn standard_takes_first_two() {
        assert_eq!(select(&HAPPY, Style::Standard, &mut ThreadRandom), "😊😄");
        assert_eq!(select(&["🌙"], Style::Standard, &mut ThreadRandom), "🌙");
    }

    #[test]
    fn random_uses_injected_source() {
        let mut rng = SequenceRandom::new(vec![2, 5]);
        assert_eq!(select(&HAPPY, Style::Random, &mut rng), "🙂");
        assert_eq!(select(&HAPPY, Style::Random, &mut rng), "😄");
    }

    #[test]
    fn random_stays_within_candidates() {
        // Only membership is checked.
        for _ in 0..50 {
            let picked = select(&HAPPY, Style::Random, &mut ThreadRandom);
            assert!(HAPPY.contains(&picked.as_str()));
        }
    }

    proptest! {
        #[test]
        fn minimal_is_first(candidates in prop::collection::vec("[a-z]{1,3}", 1..6)) {
            prop_assert_eq!(select(&candidates, Style::Minimal, &mut ThreadRandom), candidates[0].clone());
        }

        #[test]
        fn expressive_is_concatenation(candidates in prop::collection::vec("[a-z]{1,3}", 1..6)) {
            let out = select(&candidates, Style::Expressive, &mut ThreadRandom);
            prop_assert_eq!(out.len(), candidates.iter().map(String::len).sum::<usize>());
            prop_assert_eq!(out, candidates.concat());
        }
    }
}
