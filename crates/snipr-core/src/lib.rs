//! Core contracts and helpers for snipr.
//!
//! This crate defines the attribute store fed to the candidate generator,
//! the line-oriented attribute file parser, and the error type shared
//! across the workspace.

pub mod attributes;
pub mod error;
pub mod parser;

pub use attributes::{AttributeMap, AttributeValue, sanitize_value};
pub use error::{Error, Result};
pub use parser::{load_attributes, parse_attributes};

/// Attribute whose values are routed straight to the numeric token set.
pub const NUMBERS_KEY: &str = "numbers";

/// Attribute whose characters are routed straight to the special token set.
pub const SPECIALS_KEY: &str = "specials";
