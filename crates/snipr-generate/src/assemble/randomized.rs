use std::collections::BTreeSet;

use rand::Rng;

use crate::affix::Affixes;
use crate::assemble::{joiners, within_length};

/// Bounds and join settings for the randomized strategy.
#[derive(Debug, Clone)]
pub struct SampleParams<'a> {
    pub max_words: usize,
    pub separators: &'a [String],
    pub max_length: Option<usize>,
    pub max_candidates: usize,
    /// Defaults to `max_candidates * 10`.
    pub max_attempts: Option<usize>,
}

/// Draw random joins of word variants until `max_candidates` unique candidates
/// exist or the attempt budget is spent.
///
/// Each draw picks a length, then that many tokens with replacement, one
/// variant per token and one joiner (plain or a configured separator). The
/// join is decorated and a single decorated form is kept. The same RNG state
/// and inputs always produce the same set.
pub fn sample(
    variant_sets: &[Vec<String>],
    affixes: &Affixes,
    params: &SampleParams<'_>,
    rng: &mut impl Rng,
) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    let sets: Vec<&[String]> = variant_sets
        .iter()
        .filter(|set| !set.is_empty())
        .map(Vec::as_slice)
        .collect();
    let max_words = params.max_words.min(sets.len());
    if max_words == 0 || params.max_candidates == 0 {
        return candidates;
    }

    let joiners = joiners(params.separators);
    let attempts = params
        .max_attempts
        .unwrap_or_else(|| params.max_candidates.saturating_mul(10));

    for _ in 0..attempts {
        if candidates.len() >= params.max_candidates {
            break;
        }

        let size = rng.random_range(1..=max_words);
        let mut parts = Vec::with_capacity(size);
        for _ in 0..size {
            let set = sets[rng.random_range(0..sets.len())];
            parts.push(set[rng.random_range(0..set.len())].as_str());
        }
        let joiner = joiners[rng.random_range(0..joiners.len())];
        let base = parts.join(joiner);

        let decorated: Vec<String> = affixes.decorate(&base).into_iter().collect();
        let picked = &decorated[rng.random_range(0..decorated.len())];
        let candidate = affixes.wrap(picked);
        if within_length(&candidate, params.max_length) {
            candidates.insert(candidate);
        }
    }

    candidates
}
