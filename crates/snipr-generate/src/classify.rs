use std::collections::BTreeSet;

use snipr_core::{AttributeMap, NUMBERS_KEY, SPECIALS_KEY, sanitize_value};

/// Classification rules for attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    /// `numbers`/`specials` attributes feed the affix tokens and all-digit
    /// values are numeric.
    Reserved,
    /// Every value is a word, plus derived birth-date fields.
    Simple,
}

/// Classified tokens for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    /// Word tokens in order of first appearance.
    pub words: Vec<String>,
    pub numbers: BTreeSet<String>,
    pub specials: BTreeSet<char>,
}

impl TokenSet {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn push_word(&mut self, word: String) {
        if !self.words.contains(&word) {
            self.words.push(word);
        }
    }
}

/// Split attribute values into word, numeric and special tokens.
///
/// `filter_keys` must hold lower-cased keys; when present, other attributes are
/// ignored.
pub fn classify(
    map: &AttributeMap,
    filter_keys: Option<&BTreeSet<String>>,
    mode: ClassifyMode,
) -> TokenSet {
    let mut tokens = TokenSet::default();

    for (key, value) in map.iter() {
        if filter_keys.is_some_and(|keys| !keys.contains(key)) {
            continue;
        }
        for raw in value.as_slice() {
            let clean = sanitize_value(raw);
            if clean.is_empty() {
                continue;
            }
            match mode {
                ClassifyMode::Reserved if key == NUMBERS_KEY => {
                    tokens.numbers.insert(clean);
                }
                ClassifyMode::Reserved if key == SPECIALS_KEY => {
                    tokens.specials.extend(clean.chars());
                }
                ClassifyMode::Reserved if is_numeric(&clean) => {
                    tokens.numbers.insert(clean);
                }
                ClassifyMode::Reserved | ClassifyMode::Simple => tokens.push_word(clean),
            }
        }
    }

    if mode == ClassifyMode::Simple {
        for derived in derived_birth_fields(map) {
            tokens.push_word(derived);
        }
    }

    tokens
}

/// `birth_year`, `birth_day+birth_month` and `birth_month+birth_year` when the
/// components are present.
pub fn derived_birth_fields(map: &AttributeMap) -> Vec<String> {
    let field = |key: &str| {
        map.first(key)
            .map(sanitize_value)
            .filter(|value| !value.is_empty())
    };
    let year = field("birth_year");
    let day = field("birth_day");
    let month = field("birth_month");

    let mut derived = Vec::new();
    if let Some(year) = &year {
        derived.push(year.clone());
    }
    if let (Some(day), Some(month)) = (&day, &month) {
        derived.push(format!("{day}{month}"));
    }
    if let (Some(month), Some(year)) = (&month, &year) {
        derived.push(format!("{month}{year}"));
    }
    derived
}

/// Lower-case and trim a list of filter keys, dropping blanks.
pub fn normalize_filter_keys<S: AsRef<str>>(keys: &[S]) -> BTreeSet<String> {
    keys.iter()
        .map(|key| key.as_ref().trim().to_lowercase())
        .filter(|key| !key.is_empty())
        .collect()
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}
