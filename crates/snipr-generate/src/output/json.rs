use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{CountingWriter, WriteMode};
use crate::errors::GenerationError;

/// Write candidates as a pretty-printed JSON array of strings.
///
/// In append mode an existing array is read back and extended, so the file
/// stays a single valid document. Returns the number of bytes written.
pub fn write_json(
    path: &Path,
    candidates: &[String],
    mode: WriteMode,
) -> Result<u64, GenerationError> {
    let mut all: Vec<String> = Vec::new();
    if mode == WriteMode::Append && path.exists() {
        let existing = std::fs::read_to_string(path)?;
        if !existing.trim().is_empty() {
            all = serde_json::from_str(&existing)?;
        }
    }
    all.extend(candidates.iter().cloned());

    let mut writer = CountingWriter::new(BufWriter::new(File::create(path)?));
    serde_json::to_writer_pretty(&mut writer, &all)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(writer.bytes_written())
}
