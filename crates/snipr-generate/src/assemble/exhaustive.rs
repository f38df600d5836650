use std::collections::BTreeSet;
use std::ops::ControlFlow;

use crate::affix::Affixes;
use crate::assemble::{joiners, within_length};
use crate::errors::GenerationError;

/// Bounds and join settings for the exhaustive strategy.
#[derive(Debug, Clone)]
pub struct AssembleParams<'a> {
    pub max_words: usize,
    pub separators: &'a [String],
    pub max_length: Option<usize>,
    pub max_candidates: Option<usize>,
}

/// Enumerate every subset of word tokens up to `max_words`, every ordering of
/// each subset and every pick of one variant per token.
///
/// Each pick yields the plain concatenation and one join per separator. Bases
/// longer than `max_length` are dropped before decoration. Enumeration stops
/// as soon as `max_candidates` decorated candidates are held, so memory stays
/// proportional to the bound. At least one bound is required.
pub fn assemble_exhaustive(
    variant_sets: &[Vec<String>],
    affixes: &Affixes,
    params: &AssembleParams<'_>,
) -> Result<BTreeSet<String>, GenerationError> {
    if params.max_length.is_none() && params.max_candidates.is_none() {
        return Err(GenerationError::Unbounded(
            "exhaustive strategy requires max_length or max_candidates".to_string(),
        ));
    }

    let sets: Vec<&[String]> = variant_sets
        .iter()
        .filter(|set| !set.is_empty())
        .map(Vec::as_slice)
        .collect();
    let joiners = joiners(params.separators);
    let mut sink = CandidateSink::new(params.max_length, params.max_candidates);
    let token_count = sets.len();
    let max_words = params.max_words.min(token_count);

    'sizes: for size in 1..=max_words {
        let mut subset: Vec<usize> = (0..size).collect();
        loop {
            let mut order = subset.clone();
            loop {
                let mut picks = vec![0_usize; size];
                loop {
                    let parts: Vec<&str> = order
                        .iter()
                        .zip(&picks)
                        .map(|(&token, &variant)| sets[token][variant].as_str())
                        .collect();
                    for joiner in &joiners {
                        let base = parts.join(joiner);
                        if sink.offer(&base, affixes).is_break() {
                            break 'sizes;
                        }
                    }
                    if !next_pick(&mut picks, &order, &sets) {
                        break;
                    }
                }
                if !next_permutation(&mut order) {
                    break;
                }
            }
            if !next_combination(&mut subset, token_count) {
                break;
            }
        }
    }

    Ok(sink.into_candidates())
}

struct CandidateSink {
    max_length: Option<usize>,
    max_candidates: Option<usize>,
    candidates: BTreeSet<String>,
}

impl CandidateSink {
    fn new(max_length: Option<usize>, max_candidates: Option<usize>) -> Self {
        Self {
            max_length,
            max_candidates,
            candidates: BTreeSet::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.max_candidates
            .is_some_and(|max| self.candidates.len() >= max)
    }

    fn offer(&mut self, base: &str, affixes: &Affixes) -> ControlFlow<()> {
        if self.is_full() {
            return ControlFlow::Break(());
        }
        if !within_length(base, self.max_length) {
            return ControlFlow::Continue(());
        }
        for decorated in affixes.decorate(base) {
            let candidate = affixes.wrap(&decorated);
            if within_length(&candidate, self.max_length) {
                self.candidates.insert(candidate);
            }
            if self.is_full() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn into_candidates(self) -> BTreeSet<String> {
        self.candidates
    }
}

/// Advance to the next r-combination of `0..n` in lexicographic order.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let r = indices.len();
    for i in (0..r).rev() {
        if indices[i] < n - r + i {
            indices[i] += 1;
            for j in i + 1..r {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Advance to the next lexicographic permutation.
fn next_permutation(order: &mut [usize]) -> bool {
    let Some(pivot) = (1..order.len()).rev().find(|&i| order[i - 1] < order[i]) else {
        return false;
    };
    let pivot = pivot - 1;
    let Some(swap) = (pivot + 1..order.len())
        .rev()
        .find(|&i| order[i] > order[pivot])
    else {
        return false;
    };
    order.swap(pivot, swap);
    order[pivot + 1..].reverse();
    true
}

/// Odometer over one variant index per ordered token.
fn next_pick(picks: &mut [usize], order: &[usize], sets: &[&[String]]) -> bool {
    for slot in (0..picks.len()).rev() {
        picks[slot] += 1;
        if picks[slot] < sets[order[slot]].len() {
            return true;
        }
        picks[slot] = 0;
    }
    false
}
