use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across snipr crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The attribute file could not be opened or read.
    #[error("cannot read attribute file '{}': {source}", path.display())]
    AttributeFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for results returned by snipr crates.
pub type Result<T> = std::result::Result<T, Error>;
