//! Word source and definitions dictionary
//!
//! Word lists are embedded at build time, one word per line per tier.
//! Lines starting with `#` are comments.

pub mod definitions;

pub use definitions::define;

use crate::game::Difficulty;
use once_cell::sync::Lazy;
use rand::prelude::*;
use std::collections::{BTreeMap, HashSet};

static EASY_DATA: &str = include_str!("../../data/easy.txt");
static MEDIUM_DATA: &str = include_str!("../../data/medium.txt");
static HARD_DATA: &str = include_str!("../../data/hard.txt");

/// Parsed, de-duplicated word lists per tier
static TIERS: Lazy<BTreeMap<Difficulty, Vec<&'static str>>> = Lazy::new(|| {
    let mut tiers = BTreeMap::new();
    tiers.insert(Difficulty::Easy, parse_list(EASY_DATA));
    tiers.insert(Difficulty::Medium, parse_list(MEDIUM_DATA));
    tiers.insert(Difficulty::Hard, parse_list(HARD_DATA));
    tiers
});

fn parse_list(data: &'static str) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(line.to_lowercase()))
        .collect()
}

/// Supplies words for a difficulty tier.
pub trait WordSource {
    /// Up to `count` distinct words from `tier`, randomly sampled.
    /// Returns fewer when the tier is smaller than `count`.
    fn fetch_words<R: Rng + ?Sized>(&self, tier: Difficulty, count: usize, rng: &mut R)
        -> Vec<String>;

    /// Total words available per tier.
    fn word_counts(&self) -> BTreeMap<Difficulty, usize>;
}

/// The word lists bundled with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWords;

impl WordSource for EmbeddedWords {
    fn fetch_words<R: Rng + ?Sized>(
        &self,
        tier: Difficulty,
        count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let Some(words) = TIERS.get(&tier) else {
            tracing::warn!(tier = tier.label(), "no words for difficulty");
            return Vec::new();
        };
        if words.len() < count {
            tracing::warn!(
                tier = tier.label(),
                requested = count,
                available = words.len(),
                "word list shorter than requested"
            );
        }
        words
            .choose_multiple(rng, count)
            .map(|w| w.to_string())
            .collect()
    }

    fn word_counts(&self) -> BTreeMap<Difficulty, usize> {
        TIERS.iter().map(|(tier, words)| (*tier, words.len())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_every_tier_has_words() {
        let counts = EmbeddedWords.word_counts();
        for tier in Difficulty::all() {
            assert!(counts[tier] >= 50, "{} has only {}", tier.label(), counts[tier]);
        }
    }

    #[test]
    fn test_fetch_returns_unique_words() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = EmbeddedWords.fetch_words(Difficulty::Medium, 40, &mut rng);
        assert_eq!(words.len(), 40);
        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), 40);
    }

    #[test]
    fn test_fetch_short_tier_returns_what_exists() {
        let mut rng = StdRng::seed_from_u64(7);
        let available = EmbeddedWords.word_counts()[&Difficulty::Hard];
        let words = EmbeddedWords.fetch_words(Difficulty::Hard, available + 25, &mut rng);
        assert_eq!(words.len(), available);
    }

    #[test]
    fn test_fetch_zero_words() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(EmbeddedWords
            .fetch_words(Difficulty::Easy, 0, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_tiers_do_not_overlap() {
        let mut seen = HashSet::new();
        for tier in Difficulty::all() {
            for word in &TIERS[tier] {
                assert!(seen.insert(*word), "{} appears in two tiers", word);
            }
        }
    }

    #[test]
    fn test_seeded_fetch_is_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        assert_eq!(
            EmbeddedWords.fetch_words(Difficulty::Easy, 10, &mut rng1),
            EmbeddedWords.fetch_words(Difficulty::Easy, 10, &mut rng2)
        );
    }

    #[test]
    fn test_parse_list_skips_comments_and_duplicates() {
        let words = parse_list("# header\napple\n\n Apple \npear\n");
        assert_eq!(words, vec!["apple", "pear"]);
    }
}
