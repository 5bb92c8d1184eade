//! Word pool allocation across difficulty tiers

use super::Difficulty;
use crate::words::WordSource;
use rand::prelude::*;
use std::collections::HashSet;

/// Split `total` words across `tiers`: an even share each, with the
/// remainder handed out one at a time to the earliest tiers.
pub fn allocate(total: usize, tiers: &[Difficulty]) -> Vec<(Difficulty, usize)> {
    if tiers.is_empty() {
        return Vec::new();
    }
    let base = total / tiers.len();
    let remainder = total % tiers.len();
    tiers
        .iter()
        .enumerate()
        .map(|(i, tier)| (*tier, base + usize::from(i < remainder)))
        .collect()
}

/// Build a shuffled pool of `total` words drawn from `tiers`.
///
/// Short tiers yield a short pool. Duplicates across tiers are dropped.
pub fn build_pool<W, R>(source: &W, total: usize, tiers: &[Difficulty], rng: &mut R) -> Vec<String>
where
    W: WordSource,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut pool: Vec<String> = allocate(total, tiers)
        .into_iter()
        .flat_map(|(tier, count)| source.fetch_words(tier, count, rng))
        .filter(|word| seen.insert(word.clone()))
        .collect();

    if pool.len() < total {
        tracing::warn!(requested = total, built = pool.len(), "word pool is short");
    }

    pool.shuffle(rng);
    pool
}

/// A full random permutation of `pool`.
pub fn reshuffle<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
