//! Base candidate assembly strategies.

pub mod exhaustive;
pub mod randomized;
pub mod simple;

pub use exhaustive::{AssembleParams, assemble_exhaustive};
pub use randomized::{SampleParams, sample};

/// Plain concatenation followed by each distinct configured separator.
pub(crate) fn joiners(separators: &[String]) -> Vec<&str> {
    let mut joiners = vec![""];
    for separator in separators {
        if !joiners.contains(&separator.as_str()) {
            joiners.push(separator.as_str());
        }
    }
    joiners
}

pub(crate) fn within_length(candidate: &str, max_length: Option<usize>) -> bool {
    max_length.is_none_or(|max| candidate.chars().count() <= max)
}
