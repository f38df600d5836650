//! Lexical variant expansion of word tokens.
//!
//! A word expands into its case forms, its reversal and, when enabled, its
//! leetspeak spelling. The leet map is fixed:
//! `a→@ e→3 i→1 o→0 s→$ t→7 b→8`.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letter substitutions applied by [`leetspeak`].
pub const LEET_MAP: &[(char, char)] = &[
    ('a', '@'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '$'),
    ('t', '7'),
    ('b', '8'),
];

/// Expansion profile for word tokens.
#[derive(Debug, Clone)]
pub struct Expander {
    pub use_leet: bool,
    /// Apply the case forms to the leet spelling as well.
    pub leet_case_variants: bool,
    pub include_reversed: bool,
    pub mixed_case_samples: usize,
}

impl Default for Expander {
    fn default() -> Self {
        Self {
            use_leet: true,
            leet_case_variants: true,
            include_reversed: true,
            mixed_case_samples: 0,
        }
    }
}

impl Expander {
    /// Expand `word` into its deduplicated spellings. The RNG is only drawn
    /// from when `mixed_case_samples` is non-zero.
    pub fn expand(&self, word: &str, rng: &mut impl Rng) -> BTreeSet<String> {
        let mut variants = BTreeSet::new();
        if word.is_empty() {
            return variants;
        }

        variants.extend(case_forms(word));
        if self.include_reversed {
            variants.insert(word.chars().rev().collect());
        }

        if self.use_leet {
            let leet = leetspeak(&word.to_lowercase());
            if self.leet_case_variants {
                variants.extend(case_forms(&leet));
            }
            variants.insert(leet);
        }

        for _ in 0..self.mixed_case_samples {
            variants.insert(mixed_case(word, rng));
        }

        variants
    }
}

/// Expand `word` with the full deterministic profile.
pub fn expand(word: &str, use_leet: bool) -> BTreeSet<String> {
    let expander = Expander {
        use_leet,
        ..Expander::default()
    };
    // No mixed-case samples are requested, so the RNG is never drawn from.
    expander.expand(word, &mut ChaCha8Rng::seed_from_u64(0))
}

/// Substitute mapped letters; everything else passes through.
pub fn leetspeak(word: &str) -> String {
    word.chars()
        .map(|ch| {
            LEET_MAP
                .iter()
                .find(|(from, _)| *from == ch)
                .map(|(_, to)| *to)
                .unwrap_or(ch)
        })
        .collect()
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Alternate case by character position, starting upper or lower at index 0.
pub fn alternating_case(word: &str, upper_first: bool) -> String {
    word.chars()
        .enumerate()
        .flat_map(|(index, ch)| {
            let upper = (index % 2 == 0) == upper_first;
            CaseIter::new(ch, upper)
        })
        .collect()
}

fn case_forms(word: &str) -> [String; 5] {
    [
        word.to_lowercase(),
        word.to_uppercase(),
        capitalize(word),
        alternating_case(word, true),
        alternating_case(word, false),
    ]
}

fn mixed_case(word: &str, rng: &mut impl Rng) -> String {
    word.chars()
        .flat_map(|ch| CaseIter::new(ch, rng.random_bool(0.5)))
        .collect()
}

enum CaseIter {
    Upper(std::char::ToUppercase),
    Lower(std::char::ToLowercase),
}

impl CaseIter {
    fn new(ch: char, upper: bool) -> Self {
        if upper {
            CaseIter::Upper(ch.to_uppercase())
        } else {
            CaseIter::Lower(ch.to_lowercase())
        }
    }
}

impl Iterator for CaseIter {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            CaseIter::Upper(inner) => inner.next(),
            CaseIter::Lower(inner) => inner.next(),
        }
    }
}
