use std::path::Path;

use crate::attributes::AttributeMap;
use crate::error::{Error, Result};

/// Parse `key: value` lines into an attribute map.
///
/// Blank lines, `#` comments and lines without a colon are skipped. Only the
/// first colon splits, so values may contain colons themselves.
pub fn parse_attributes(text: &str) -> AttributeMap {
    let mut map = AttributeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        map.insert(key, value.trim());
    }

    map
}

/// Read and parse an attribute file.
pub fn load_attributes(path: &Path) -> Result<AttributeMap> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::AttributeFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_attributes(&text))
}
