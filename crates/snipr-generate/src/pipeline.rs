//! Post-processing stages applied after assembly.
//!
//! Stages run in a fixed order: length filter, dedup, exclusion, pairwise
//! combination, shuffle, truncation. Shuffle and truncation change order or
//! drop entries, so they always run last.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::model::{GenerationIssue, GenerationReport};

/// Separator used by the second form of a combined pair.
pub const PAIR_SEPARATOR: &str = "_";

/// Keep candidates whose character length lies within the bounds.
pub fn filter_length(
    candidates: Vec<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| {
            let len = candidate.chars().count();
            min_length.is_none_or(|min| len >= min) && max_length.is_none_or(|max| len <= max)
        })
        .collect()
}

/// Remove duplicates and sort.
pub fn dedup_sorted(candidates: Vec<String>) -> Vec<String> {
    candidates
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Passwords removed from the output by exact line match.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    entries: HashSet<String>,
}

impl ExclusionList {
    /// Read one entry per line, trimmed; blank lines are dropped. Lines that
    /// are not valid UTF-8 are decoded as Latin-1.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let entries = bytes
            .split(|byte| *byte == b'\n')
            .map(decode_line)
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { entries }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove_from(&self, candidates: Vec<String>) -> Vec<String> {
        candidates
            .into_iter()
            .filter(|candidate| !self.contains(candidate))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(line) => line.to_string(),
        Err(_) => bytes.iter().map(|&byte| byte as char).collect(),
    }
}

/// Concatenate ordered pairs of the leading candidates.
///
/// Uses the first `min(len, floor(sqrt(cap)))` candidates; every ordered pair
/// of distinct positions adds `a+b` and `a_b`. Stops once `cap` distinct
/// combinations exist.
pub fn combine_pairs(candidates: &[String], cap: usize) -> BTreeSet<String> {
    let mut combined = BTreeSet::new();
    let head = candidates.len().min(cap.isqrt());

    for i in 0..head {
        for j in 0..head {
            if i == j {
                continue;
            }
            combined.insert(format!("{}{}", candidates[i], candidates[j]));
            combined.insert(format!(
                "{}{PAIR_SEPARATOR}{}",
                candidates[i], candidates[j]
            ));
            if combined.len() >= cap {
                return combined;
            }
        }
    }

    combined
}

/// Randomize order in place.
pub fn shuffle(candidates: &mut [String], rng: &mut impl Rng) {
    candidates.shuffle(rng);
}

/// Settings for [`PostProcessor`].
#[derive(Debug, Clone, Default)]
pub struct PostProcessOptions<'a> {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub exclusion_list: Option<&'a Path>,
    pub combine_pairs: Option<usize>,
    pub shuffle: bool,
    pub limit: Option<usize>,
}

/// Runs the post-processing stages and records counts in the report.
pub struct PostProcessor<'a> {
    options: PostProcessOptions<'a>,
}

impl<'a> PostProcessor<'a> {
    pub fn new(options: PostProcessOptions<'a>) -> Self {
        Self { options }
    }

    pub fn run(
        &self,
        candidates: Vec<String>,
        rng: &mut impl Rng,
        report: &mut GenerationReport,
    ) -> Vec<String> {
        let options = &self.options;
        let before = candidates.len();
        let candidates = filter_length(candidates, options.min_length, options.max_length);
        report.removed_by_length += before - candidates.len();
        debug!(kept = candidates.len(), "length filter applied");

        let mut candidates = dedup_sorted(candidates);

        let exclusions = options
            .exclusion_list
            .and_then(|path| load_exclusions(path, report));
        if let Some(exclusions) = &exclusions {
            let before = candidates.len();
            candidates = exclusions.remove_from(candidates);
            report.removed_common += before - candidates.len();
            debug!(
                entries = exclusions.len(),
                removed = before - candidates.len(),
                "exclusion list applied"
            );
        }

        if let Some(cap) = options.combine_pairs {
            let pairs = combine_pairs(&candidates, cap);
            let before = candidates.len();
            candidates.extend(pairs);
            let merged = filter_length(candidates, options.min_length, options.max_length);
            let merged = dedup_sorted(merged);
            candidates = match &exclusions {
                Some(exclusions) => exclusions.remove_from(merged),
                None => merged,
            };
            report.pairs_added += candidates.len().saturating_sub(before);
            debug!(total = candidates.len(), "pairwise combinations merged");
        }

        if options.shuffle {
            shuffle(&mut candidates, rng);
        }

        if let Some(limit) = options.limit {
            candidates.truncate(limit);
        }

        candidates
    }
}

fn load_exclusions(path: &Path, report: &mut GenerationReport) -> Option<ExclusionList> {
    match ExclusionList::load(path) {
        Ok(list) => Some(list),
        Err(err) => {
            let issue = GenerationIssue {
                level: "warning".to_string(),
                code: "exclusion_list_unreadable".to_string(),
                message: format!("skipping exclusion stage: {err}"),
                path: Some(path.display().to_string()),
            };
            warn!(
                code = %issue.code,
                path = issue.path.as_deref().unwrap_or(""),
                message = %issue.message
            );
            report.record_warning(issue);
            None
        }
    }
}
