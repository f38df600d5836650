use std::path::Path;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use snipr_core::{AttributeMap, load_attributes};

use crate::affix::Affixes;
use crate::assemble::simple::{self, SimpleParams};
use crate::assemble::{AssembleParams, SampleParams, assemble_exhaustive, sample};
use crate::classify::{ClassifyMode, TokenSet, classify, normalize_filter_keys};
use crate::errors::GenerationError;
use crate::lexical::Expander;
use crate::model::{
    GenerateOptions, GenerationIssue, GenerationReport, LengthStats, MAX_SEED, Strategy,
};
use crate::pipeline::{PostProcessOptions, PostProcessor};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Final candidates, sorted unless shuffling was requested.
    pub candidates: Vec<String>,
    pub report: GenerationReport,
}

/// Entry point for turning an attribute map into password candidates.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn run(&self, attributes: &AttributeMap) -> Result<GenerationResult, GenerationError> {
        let options = &self.options;
        validate_options(options)?;

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();
        let seed = options
            .seed
            .unwrap_or_else(|| rand::random_range(0..=MAX_SEED));
        let mut report = GenerationReport::new(run_id.clone(), started_at, options, seed);

        info!(
            run_id = %run_id,
            strategy = options.strategy.as_str(),
            seed,
            attributes = attributes.len(),
            "generation started"
        );

        let filter_keys = options
            .filter_keys
            .as_deref()
            .map(normalize_filter_keys);
        let mode = match options.strategy {
            Strategy::Simple => ClassifyMode::Simple,
            Strategy::Exhaustive | Strategy::Randomized => ClassifyMode::Reserved,
        };
        let mut tokens = classify(attributes, filter_keys.as_ref(), mode);
        if mode == ClassifyMode::Reserved {
            tokens
                .specials
                .extend(options.specials.chars().filter(|ch| !ch.is_whitespace()));
        }
        report.word_tokens = tokens.words.len();
        report.number_tokens = tokens.numbers.len();
        report.special_tokens = tokens.specials.len();
        debug!(
            words = tokens.words.len(),
            numbers = tokens.numbers.len(),
            specials = tokens.specials.len(),
            "attributes classified"
        );

        if tokens.is_empty() {
            let issue = GenerationIssue {
                level: "warning".to_string(),
                code: "no_word_tokens".to_string(),
                message: "no usable word tokens; output will be empty".to_string(),
                path: None,
            };
            warn!(code = %issue.code, message = %issue.message);
            report.record_warning(issue);
        }

        let affixes = Affixes {
            numbers: tokens.numbers.clone(),
            specials: tokens.specials.clone(),
            rich: options.rich,
            prepend: options.prepend.clone(),
            append: options.append.clone(),
        };

        let assembled = match options.strategy {
            Strategy::Simple => {
                let params = SimpleParams {
                    use_leet: options.use_leet,
                    specials: &options.specials,
                    separators: &options.separators,
                    combine_names: options.combine_names,
                };
                simple::generate(attributes, &tokens, &affixes, &params)
            }
            Strategy::Exhaustive => {
                let variant_sets = self.variant_sets(&tokens, seed);
                let params = AssembleParams {
                    max_words: options.max_words_per_combo,
                    separators: &options.separators,
                    max_length: options.max_length,
                    max_candidates: options.max_candidates,
                };
                assemble_exhaustive(&variant_sets, &affixes, &params)?
            }
            Strategy::Randomized => {
                let max_candidates = options.max_candidates.ok_or_else(|| {
                    GenerationError::InvalidConfig(
                        "randomized strategy requires max_candidates".to_string(),
                    )
                })?;
                let variant_sets = self.variant_sets(&tokens, seed);
                let params = SampleParams {
                    max_words: options.max_words_per_combo,
                    separators: &options.separators,
                    max_length: options.max_length,
                    max_candidates,
                    max_attempts: options.max_attempts,
                };
                let mut rng = stage_rng(seed, "sample");
                sample(&variant_sets, &affixes, &params, &mut rng)
            }
        };
        report.assembled = assembled.len();
        info!(
            run_id = %run_id,
            assembled = assembled.len(),
            "candidates assembled"
        );

        let processor = PostProcessor::new(PostProcessOptions {
            min_length: options.min_length,
            max_length: options.max_length,
            exclusion_list: options.exclusion_list.as_deref(),
            combine_pairs: options.combine_pairs,
            shuffle: options.shuffle,
            limit: options.limit,
        });
        let mut shuffle_rng = stage_rng(seed, "shuffle");
        let candidates = processor.run(assembled.into_iter().collect(), &mut shuffle_rng, &mut report);

        report.final_count = candidates.len();
        report.stats = LengthStats::from_candidates(&candidates);
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            candidates = report.final_count,
            removed_by_length = report.removed_by_length,
            removed_common = report.removed_common,
            pairs_added = report.pairs_added,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { candidates, report })
    }

    /// Load an attribute file and run on it.
    pub fn run_file(&self, path: &Path) -> Result<GenerationResult, GenerationError> {
        let attributes = load_attributes(path)?;
        self.run(&attributes)
    }

    fn variant_sets(&self, tokens: &TokenSet, seed: u64) -> Vec<Vec<String>> {
        let expander = Expander {
            use_leet: self.options.use_leet,
            leet_case_variants: self.options.rich,
            include_reversed: self.options.include_reversed,
            mixed_case_samples: self.options.mixed_case_samples,
        };
        let mut rng = stage_rng(seed, "mixed_case");
        tokens
            .words
            .iter()
            .map(|word| expander.expand(word, &mut rng).into_iter().collect())
            .collect()
    }
}

fn validate_options(options: &GenerateOptions) -> Result<(), GenerationError> {
    if let (Some(min), Some(max)) = (options.min_length, options.max_length)
        && min > max
    {
        return Err(GenerationError::InvalidConfig(
            "min_length must be <= max_length".to_string(),
        ));
    }
    if let Some(seed) = options.seed
        && seed > MAX_SEED
    {
        return Err(GenerationError::InvalidConfig(format!(
            "seed must be <= {MAX_SEED}, got {seed}"
        )));
    }
    if options.strategy != Strategy::Simple && options.max_words_per_combo == 0 {
        return Err(GenerationError::InvalidConfig(
            "max_words_per_combo must be >= 1".to_string(),
        ));
    }
    if options.strategy == Strategy::Exhaustive
        && options.max_length.is_none()
        && options.max_candidates.is_none()
    {
        return Err(GenerationError::Unbounded(
            "exhaustive strategy requires max_length or max_candidates".to_string(),
        ));
    }
    Ok(())
}

/// Independent RNG stream per stage, derived from the run seed.
fn stage_rng(seed: u64, stage: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, stage))
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
