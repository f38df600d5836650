use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Largest accepted seed. Seeds stay within the signed 64-bit range so they
/// can be written back into a TOML config.
pub const MAX_SEED: u64 = i64::MAX as u64;

/// How base candidates are produced from the word tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Case forms of each value with fixed suffixes and name combinations.
    #[default]
    Simple,
    /// Bounded enumeration of subsets, orderings and variant products.
    Exhaustive,
    /// Bounded random sampling of the same space.
    Randomized,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Simple => "simple",
            Strategy::Exhaustive => "exhaustive",
            Strategy::Randomized => "randomized",
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub strategy: Strategy,
    /// Add leetspeak spellings of word tokens.
    pub use_leet: bool,
    /// Case-vary the leet form and inject number+special pairs.
    pub rich: bool,
    /// Include the reversed spelling of each word token.
    pub include_reversed: bool,
    /// Random mixed-case spellings added per word token.
    pub mixed_case_samples: usize,
    /// Join separators used besides plain concatenation.
    pub separators: Vec<String>,
    /// Special characters merged with the `specials` attribute.
    pub specials: String,
    pub prepend: String,
    pub append: String,
    pub max_words_per_combo: usize,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Candidate bound for the exhaustive and randomized strategies.
    pub max_candidates: Option<usize>,
    /// Draw limit for the randomized strategy; defaults to ten draws per candidate.
    pub max_attempts: Option<usize>,
    /// Seed for every random path, at most [`MAX_SEED`]. Without one,
    /// mixed-case spellings, randomized sampling and shuffling are not
    /// reproducible.
    pub seed: Option<u64>,
    /// Only consider these attribute keys.
    pub filter_keys: Option<Vec<String>>,
    /// Join first and last names (simple strategy).
    pub combine_names: bool,
    /// Cap for pairwise concatenation of finished candidates; `None` disables it.
    pub combine_pairs: Option<usize>,
    pub shuffle: bool,
    /// Keep only the first `limit` candidates.
    pub limit: Option<usize>,
    /// File of passwords removed from the output.
    pub exclusion_list: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            use_leet: true,
            rich: true,
            include_reversed: true,
            mixed_case_samples: 0,
            separators: vec!["_".to_string()],
            specials: "!".to_string(),
            prepend: String::new(),
            append: String::new(),
            max_words_per_combo: 3,
            min_length: None,
            max_length: None,
            max_candidates: None,
            max_attempts: None,
            seed: None,
            filter_keys: None,
            combine_names: true,
            combine_pairs: None,
            shuffle: false,
            limit: None,
            exclusion_list: None,
        }
    }
}

/// Length statistics over a candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub count: usize,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub average: Option<f64>,
}

impl LengthStats {
    pub fn from_candidates(candidates: &[String]) -> Self {
        let lengths: Vec<usize> = candidates
            .iter()
            .map(|candidate| candidate.chars().count())
            .collect();
        if lengths.is_empty() {
            return Self {
                count: 0,
                min: None,
                max: None,
                average: None,
            };
        }
        let total: usize = lengths.iter().sum();
        Self {
            count: lengths.len(),
            min: lengths.iter().min().copied(),
            max: lengths.iter().max().copied(),
            average: Some(total as f64 / lengths.len() as f64),
        }
    }
}

/// Structured generation issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationIssue {
    pub level: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: String,
    pub strategy: Strategy,
    pub seed: Option<u64>,
    /// Seed actually used; equals `seed` when one was configured.
    pub effective_seed: u64,
    pub word_tokens: usize,
    pub number_tokens: usize,
    pub special_tokens: usize,
    pub assembled: usize,
    pub removed_by_length: usize,
    pub removed_common: usize,
    pub pairs_added: usize,
    pub final_count: usize,
    pub stats: LengthStats,
    pub duration_ms: u64,
    pub warnings_by_code: BTreeMap<String, u64>,
    pub warnings: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn new(
        run_id: String,
        started_at: String,
        options: &GenerateOptions,
        effective_seed: u64,
    ) -> Self {
        Self {
            run_id,
            started_at,
            strategy: options.strategy,
            seed: options.seed,
            effective_seed,
            word_tokens: 0,
            number_tokens: 0,
            special_tokens: 0,
            assembled: 0,
            removed_by_length: 0,
            removed_common: 0,
            pairs_added: 0,
            final_count: 0,
            stats: LengthStats::from_candidates(&[]),
            duration_ms: 0,
            warnings_by_code: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record_warning(&mut self, issue: GenerationIssue) {
        *self.warnings_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        self.warnings.push(issue);
    }
}
