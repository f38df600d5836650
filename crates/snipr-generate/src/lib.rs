//! Candidate generation engine for snipr.
//!
//! This crate turns an attribute map into a bounded, deduplicated list of
//! password candidates: lexical expansion, token classification, assembly,
//! affix injection and post-processing, plus text/JSON output sinks.

pub mod affix;
pub mod assemble;
pub mod classify;
pub mod engine;
pub mod errors;
pub mod lexical;
pub mod model;
pub mod output;
pub mod pipeline;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{
    GenerateOptions, GenerationIssue, GenerationReport, LengthStats, MAX_SEED, Strategy,
};
