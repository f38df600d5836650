use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{CountingWriter, WriteMode};
use crate::errors::GenerationError;

/// Write one candidate per line. Returns the number of bytes written.
pub fn write_text(
    path: &Path,
    candidates: &[String],
    mode: WriteMode,
) -> Result<u64, GenerationError> {
    let file = open(path, mode)?;
    let mut writer = CountingWriter::new(BufWriter::new(file));

    for candidate in candidates {
        writer.write_all(candidate.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(writer.bytes_written())
}

fn open(path: &Path, mode: WriteMode) -> std::io::Result<std::fs::File> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Overwrite => options.write(true).truncate(true),
        WriteMode::Append => options.append(true),
    };
    options.open(path)
}
